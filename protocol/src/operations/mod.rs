//! # Operations
//!
//! The ledger actions a transaction can carry. Each kind is a variant of
//! [`Operation`] with a stable integer tag and two renderings:
//!
//! - binary: the variant's fields concatenated in a fixed order (the tag is
//!   written by the enclosing transaction, not by the operation);
//! - structured: `[tag, { fields... }]`.
//!
//! ```text
//! transfer.rs       — tag 0, move funds between accounts
//! account_create.rs — tag 5, register an account
//! account_update.rs — tag 6, change authorities or options
//! registry.rs       — static tag → decoder table
//! ```

pub mod account_create;
pub mod account_update;
pub mod registry;
pub mod transfer;

use serde_json::{json, Value};
use std::fmt;

pub use account_create::AccountCreateOperation;
pub use account_update::AccountUpdateOperation;
pub use registry::decode_operation;
pub use transfer::TransferOperation;

use crate::serialization::{BinaryEncode, DecodingError, EncodingError};
use crate::types::AssetAmount;

// ---------------------------------------------------------------------------
// OperationType
// ---------------------------------------------------------------------------

/// Stable type tags, as assigned by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Transfer,
    AccountCreate,
    AccountUpdate,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [
        OperationType::Transfer,
        OperationType::AccountCreate,
        OperationType::AccountUpdate,
    ];

    pub const fn code(self) -> u64 {
        match self {
            Self::Transfer => 0,
            Self::AccountCreate => 5,
            Self::AccountUpdate => 6,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "transfer"),
            Self::AccountCreate => write!(f, "account_create"),
            Self::AccountUpdate => write!(f, "account_update"),
        }
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Transfer(TransferOperation),
    AccountCreate(AccountCreateOperation),
    AccountUpdate(AccountUpdateOperation),
}

impl Operation {
    pub fn op_type(&self) -> OperationType {
        match self {
            Self::Transfer(_) => OperationType::Transfer,
            Self::AccountCreate(_) => OperationType::AccountCreate,
            Self::AccountUpdate(_) => OperationType::AccountUpdate,
        }
    }

    pub fn fee(&self) -> Option<&AssetAmount> {
        match self {
            Self::Transfer(op) => op.fee.as_ref(),
            Self::AccountCreate(op) => op.fee.as_ref(),
            Self::AccountUpdate(op) => op.fee.as_ref(),
        }
    }

    pub fn set_fee(&mut self, fee: AssetAmount) {
        let slot = match self {
            Self::Transfer(op) => &mut op.fee,
            Self::AccountCreate(op) => &mut op.fee,
            Self::AccountUpdate(op) => &mut op.fee,
        };
        *slot = Some(fee);
    }

    /// `[tag, fields]`.
    pub fn to_structured(&self) -> Result<Value, EncodingError> {
        let fields = match self {
            Self::Transfer(op) => op.fields_to_structured()?,
            Self::AccountCreate(op) => op.fields_to_structured()?,
            Self::AccountUpdate(op) => op.fields_to_structured()?,
        };
        Ok(json!([self.op_type().code(), fields]))
    }

    /// Inverse of [`Operation::to_structured`]. `Ok(None)` for tags with no
    /// registered decoder.
    pub fn from_structured(entry: &Value) -> Result<Option<Self>, DecodingError> {
        decode_operation(entry)
    }
}

impl BinaryEncode for Operation {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        match self {
            Self::Transfer(op) => op.write_binary(buf),
            Self::AccountCreate(op) => op.write_binary(buf),
            Self::AccountUpdate(op) => op.write_binary(buf),
        }
    }
}

impl From<TransferOperation> for Operation {
    fn from(op: TransferOperation) -> Self {
        Self::Transfer(op)
    }
}

impl From<AccountCreateOperation> for Operation {
    fn from(op: AccountCreateOperation) -> Self {
        Self::AccountCreate(op)
    }
}

impl From<AccountUpdateOperation> for Operation {
    fn from(op: AccountUpdateOperation) -> Self {
        Self::AccountUpdate(op)
    }
}
