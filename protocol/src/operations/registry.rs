//! Type tag → decoder table used when reading operations back from the
//! structured wire form.
//!
//! The table is a `static` slice: built at compile time and never mutated.
//! Supporting a new operation kind means adding a variant to
//! [`Operation`] and one row here.

use serde_json::Value;

use super::account_create::AccountCreateOperation;
use super::account_update::AccountUpdateOperation;
use super::transfer::TransferOperation;
use super::{Operation, OperationType};
use crate::serialization::structured::as_array;
use crate::serialization::DecodingError;

/// Decodes the fields object of one operation kind.
pub type DecodeFn = fn(&Value) -> Result<Operation, DecodingError>;

static REGISTRY: &[(OperationType, DecodeFn)] = &[
    (OperationType::Transfer, decode_transfer),
    (OperationType::AccountCreate, decode_account_create),
    (OperationType::AccountUpdate, decode_account_update),
];

fn decode_transfer(fields: &Value) -> Result<Operation, DecodingError> {
    TransferOperation::from_structured_fields(fields).map(Operation::Transfer)
}

fn decode_account_create(fields: &Value) -> Result<Operation, DecodingError> {
    AccountCreateOperation::from_structured_fields(fields).map(Operation::AccountCreate)
}

fn decode_account_update(fields: &Value) -> Result<Operation, DecodingError> {
    AccountUpdateOperation::from_structured_fields(fields).map(Operation::AccountUpdate)
}

/// Returns the decoder registered for `tag`, or `None` for tags this
/// client does not understand.
pub fn lookup(tag: u64) -> Option<DecodeFn> {
    REGISTRY
        .iter()
        .find(|(op_type, _)| op_type.code() == tag)
        .map(|(_, decode)| *decode)
}

/// Every operation type with a registered decoder.
pub fn registered_types() -> impl Iterator<Item = OperationType> {
    REGISTRY.iter().map(|(op_type, _)| *op_type)
}

/// Decodes one `[tag, fields]` entry.
///
/// Returns `Ok(None)` when the tag has no registered decoder; whether to
/// skip or reject such an entry is the caller's decision.
pub fn decode_operation(entry: &Value) -> Result<Option<Operation>, DecodingError> {
    let pair = as_array(entry, "operation entry")?;
    let [tag, fields] = pair.as_slice() else {
        return Err(DecodingError::UnexpectedShape(format!(
            "operation entry must be [tag, fields], got {} elements",
            pair.len()
        )));
    };
    let tag = tag
        .as_u64()
        .ok_or_else(|| DecodingError::invalid("operation tag", "expected an unsigned integer"))?;

    match lookup(tag) {
        Some(decode) => decode(fields).map(Some),
        None => Ok(None),
    }
}
