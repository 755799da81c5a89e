use thiserror::Error;

use crate::crypto::SignatureError;
use crate::serialization::{DecodingError, EncodingError};

/// Errors raised while building, rendering or signing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Decoding(#[from] DecodingError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("no chain id set; the signing payload cannot be built")]
    MissingChainId,

    #[error("no private key set")]
    MissingPrivateKey,

    /// No acceptable signature was found within the attempt bound.
    #[error("no acceptable signature after {attempts} attempts")]
    SigningExhausted { attempts: u32 },

    #[error("fee count mismatch: {expected} operations, {got} fees")]
    FeeCountMismatch { expected: usize, got: usize },
}
