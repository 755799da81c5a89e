//! The transaction aggregate and its fluent builder.
//!
//! A [`Transaction`] owns its operations, the reference-block header, the
//! chain id and (optionally) the key it will be signed with. Every setter
//! that changes the signing payload drops any cached signature, so a
//! signature held in [`SigningState::Signed`] always matches
//! [`Transaction::to_bytes`].

use tracing::debug;

use super::error::TransactionError;
use super::signing::SigningState;
use super::types::{BlockData, ChainId};
use crate::config::{MAX_SIGNING_ATTEMPTS, TXID_LENGTH};
use crate::crypto::hash::sha256_array;
use crate::crypto::{PrivateKey, Signature};
use crate::operations::Operation;
use crate::serialization::{varint, BinaryEncode};
use crate::types::AssetAmount;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A GXChain transaction.
///
/// # Canonical Byte Format
///
/// ```text
/// chain_id ‖ ref_block_num (u16) ‖ ref_block_prefix (u32) ‖ expiration (u32)
///          ‖ varint(op count) ‖ { varint(tag) ‖ op bytes }*
///          ‖ 0x00 (signatures) ‖ 0x00 (extensions)
/// ```
///
/// This is both the signing payload and the txid hash input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(super) block_data: BlockData,
    pub(super) operations: Vec<Operation>,
    pub(super) chain_id: Option<ChainId>,
    pub(super) private_key: Option<PrivateKey>,
    pub(super) max_signing_attempts: u32,
    pub(super) state: SigningState,
}

impl Transaction {
    pub fn new(block_data: BlockData, operations: Vec<Operation>) -> Self {
        Self {
            block_data,
            operations,
            chain_id: None,
            private_key: None,
            max_signing_attempts: MAX_SIGNING_ATTEMPTS,
            state: SigningState::Unsigned,
        }
    }

    pub fn block_data(&self) -> &BlockData {
        &self.block_data
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn chain_id(&self) -> Option<&ChainId> {
        self.chain_id.as_ref()
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn max_signing_attempts(&self) -> u32 {
        self.max_signing_attempts
    }

    pub fn state(&self) -> &SigningState {
        &self.state
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.state, SigningState::Signed(_))
    }

    /// The cached signature, if the transaction is signed.
    pub fn signature(&self) -> Option<&Signature> {
        match &self.state {
            SigningState::Signed(signature) => Some(signature),
            _ => None,
        }
    }

    pub fn signature_hex(&self) -> Option<String> {
        self.signature().map(Signature::to_hex)
    }

    /// Assigns one fee per operation, in order.
    pub fn set_fees(&mut self, fees: Vec<AssetAmount>) -> Result<(), TransactionError> {
        if fees.len() != self.operations.len() {
            return Err(TransactionError::FeeCountMismatch {
                expected: self.operations.len(),
                got: fees.len(),
            });
        }
        for (op, fee) in self.operations.iter_mut().zip(fees) {
            op.set_fee(fee);
        }
        self.reset();
        Ok(())
    }

    pub fn set_block_data(&mut self, block_data: BlockData) {
        self.block_data = block_data;
        self.reset();
    }

    pub fn set_private_key(&mut self, key: PrivateKey) {
        self.private_key = Some(key);
        self.reset();
    }

    pub fn set_chain_id(&mut self, chain_id: ChainId) {
        self.chain_id = Some(chain_id);
        self.reset();
    }

    /// Bound on the expiration-bumping search in [`Transaction::sign_with`].
    pub fn set_max_signing_attempts(&mut self, attempts: u32) {
        self.max_signing_attempts = attempts;
    }

    /// The canonical signing payload. Fails without a chain id, or when an
    /// operation is missing a required field.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let chain_id = self
            .chain_id
            .as_ref()
            .ok_or(TransactionError::MissingChainId)?;

        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(chain_id.as_bytes());
        self.block_data.write_binary(&mut buf)?;

        varint::write(self.operations.len() as u64, &mut buf);
        for op in &self.operations {
            varint::write(op.op_type().code(), &mut buf);
            op.write_binary(&mut buf)?;
        }

        // Empty signature list, then empty extensions.
        buf.push(0x00);
        buf.push(0x00);
        Ok(buf)
    }

    /// `hex(SHA-256(to_bytes())[..20])`.
    pub fn calculate_txid(&self) -> Result<String, TransactionError> {
        let digest = sha256_array(&self.to_bytes()?);
        Ok(hex::encode(&digest[..TXID_LENGTH]))
    }

    fn reset(&mut self) {
        if !matches!(self.state, SigningState::Unsigned) {
            debug!("transaction changed, dropping cached signature");
        }
        self.state = SigningState::Unsigned;
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`].
///
/// ```rust,no_run
/// use gxc_protocol::config::MAINNET_CHAIN_ID;
/// use gxc_protocol::operations::TransferOperation;
/// use gxc_protocol::transaction::{BlockData, TransactionBuilder};
/// use gxc_protocol::types::{AssetAmount, ObjectId};
///
/// let tx = TransactionBuilder::new()
///     .block_data(BlockData::new(34_521, 3_162_120_021, 1_700_000_120))
///     .operation(
///         TransferOperation::new(
///             ObjectId::account(17),
///             ObjectId::account(300),
///             AssetAmount::new(100_000, ObjectId::asset(1)),
///         )
///         .with_fee(AssetAmount::new(1_000, ObjectId::asset(1))),
///     )
///     .chain_id(MAINNET_CHAIN_ID.parse().unwrap())
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    block_data: BlockData,
    operations: Vec<Operation>,
    chain_id: Option<ChainId>,
    private_key: Option<PrivateKey>,
    max_signing_attempts: Option<u32>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_data(mut self, block_data: BlockData) -> Self {
        self.block_data = block_data;
        self
    }

    /// Appends one operation.
    pub fn operation(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(ops);
        self
    }

    pub fn chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn private_key(mut self, key: PrivateKey) -> Self {
        self.private_key = Some(key);
        self
    }

    pub fn max_signing_attempts(mut self, attempts: u32) -> Self {
        self.max_signing_attempts = Some(attempts);
        self
    }

    /// Produces an unsigned [`Transaction`].
    pub fn build(self) -> Transaction {
        let mut tx = Transaction::new(self.block_data, self.operations);
        tx.chain_id = self.chain_id;
        tx.private_key = self.private_key;
        if let Some(attempts) = self.max_signing_attempts {
            tx.max_signing_attempts = attempts;
        }
        tx
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
