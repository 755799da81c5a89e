//! # Hashing Utilities
//!
//! Two hash functions, both dictated by the chain:
//!
//! - **SHA-256** — digest signed by transaction signatures and the basis of
//!   transaction ids.
//! - **RIPEMD-160** — checksum appended to the base58 text form of public keys.

use bitcoin_hashes::{ripemd160 as bh_ripemd160, Hash as BHHash};
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use gxc_protocol::crypto::sha256;
///
/// let hash = sha256(b"GXChain");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_array(data).to_vec()
}

/// Same as [`sha256`] but returns a fixed-size array, which is what the
/// secp256k1 message type wants.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    bh_ripemd160::Hash::hash(data).to_byte_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // NIST test vector for "abc".
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_array_matches_vec() {
        let data = b"ref_block_num";
        assert_eq!(sha256(data), sha256_array(data).to_vec());
    }

    #[test]
    fn ripemd160_known_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn ripemd160_empty_input() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }
}
