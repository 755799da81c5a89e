//! # Transaction Module
//!
//! Construction, binary encoding, signing and structured (JSON) rendering
//! of GXChain transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs    — BlockData (TaPoS header + expiration), ChainId
//! builder.rs  — Transaction aggregate, canonical bytes, txid, TransactionBuilder
//! signing.rs  — SigningState and the bounded expiration-bumping search
//! wire.rs     — structured form, lenient decode with DecodeReport
//! error.rs    — TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — assemble operations and header with [`TransactionBuilder`].
//! 2. **Fee** — fill in the fees quoted by a node with [`Transaction::set_fees`].
//! 3. **Sign** — [`Transaction::sign`] searches for a canonical signature.
//! 4. **Broadcast** — send [`Transaction::to_structured`] to a node.
//!
//! A transaction id is the first 20 bytes of `SHA-256(chain_id ‖ bytes)`, so
//! it changes whenever signing moves the expiration. Compute it after
//! signing.

pub mod builder;
pub mod error;
pub mod signing;
pub mod types;
pub mod wire;

pub use builder::{Transaction, TransactionBuilder};
pub use error::TransactionError;
pub use signing::SigningState;
pub use types::{BlockData, ChainId};
pub use wire::DecodeReport;
