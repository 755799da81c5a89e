//! # Cryptographic Primitives
//!
//! Everything the transaction layer needs from cryptography, and nothing
//! else:
//!
//! - **secp256k1** keys and compact recoverable signatures.
//! - **SHA-256** for the signed digest and transaction ids.
//! - **RIPEMD-160** for the public key checksum.
//!
//! All curve arithmetic is delegated to the `secp256k1` crate.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{ripemd160, sha256, sha256_array};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use signatures::{is_canonical, EcdsaSigner, Signature, SignatureError, SigningService};
