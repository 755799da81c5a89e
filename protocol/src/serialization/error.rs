//! Error types for the binary and structured codecs.
//!
//! Encoding errors are raised when an object is rendered before all of its
//! required fields have been set. Decoding errors are raised when structured
//! input is missing a key or carries a value of the wrong shape.

use thiserror::Error;

/// Errors raised while rendering an object to its binary or structured form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A required field was never set.
    #[error("required field `{0}` is not set")]
    MissingField(&'static str),

    /// A string does not fit behind a one-byte length prefix.
    #[error("field `{field}` is {len} bytes long, the maximum is {max}")]
    StringTooLong {
        /// The offending field.
        field: &'static str,
        /// Its length in bytes.
        len: usize,
        /// The largest encodable length.
        max: usize,
    },
}

/// A varint byte stream that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedVarint {
    /// The stream ended before a byte with the continuation bit clear.
    #[error("malformed varint: input ended after {read} bytes without a terminating byte")]
    Truncated {
        /// Bytes consumed before the input ran out.
        read: usize,
    },

    /// The encoded value does not fit in 64 bits.
    #[error("malformed varint: value overflows 64 bits")]
    Overflow,
}

/// Errors raised while re-hydrating an object from its structured form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// A required key is absent from the fields object.
    #[error("missing key `{0}`")]
    MissingKey(String),

    /// A key is present but its value cannot be interpreted.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidField {
        /// The key holding the bad value.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The value as a whole does not have the expected JSON shape.
    #[error("unexpected shape: {0}")]
    UnexpectedShape(String),
}

impl DecodingError {
    /// Shorthand for [`DecodingError::InvalidField`].
    pub fn invalid(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidField {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
