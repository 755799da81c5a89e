//! # Wire Codecs
//!
//! Every object that ends up on chain has two renderings:
//!
//! - **binary** — the canonical byte layout that is hashed and signed. It is
//!   one-way: nodes never send it back, so only encoding is implemented.
//! - **structured** — the JSON form accepted by a node's API, which must
//!   round-trip.
//!
//! ```text
//! varint.rs     — unsigned LEB128 integers
//! binary.rs     — BinaryEncode, fixed-width writers, length-prefixed strings
//! structured.rs — keyed field accessors over serde_json values
//! error.rs      — EncodingError, DecodingError, MalformedVarint
//! ```

pub mod binary;
pub mod error;
pub mod structured;
pub mod varint;

pub use binary::BinaryEncode;
pub use error::{DecodingError, EncodingError, MalformedVarint};
