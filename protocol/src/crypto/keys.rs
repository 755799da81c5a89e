//! # Key Management
//!
//! secp256k1 private and public keys as the chain sees them.
//!
//! Public keys travel in two forms: 33 compressed bytes inside the binary
//! payload, and `GXC` + base58(key ‖ checksum) in the structured form, where
//! the checksum is the first four bytes of RIPEMD-160 over the key.
//!
//! Importing keys from wallet formats (WIF, brain keys) is the wallet's job;
//! this module accepts raw 32-byte secrets only. Key bytes are never logged.

use rand::rngs::OsRng;
use secp256k1::{All, Secp256k1, SecretKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::hash::ripemd160;
use crate::config::ADDRESS_PREFIX;
use crate::serialization::{BinaryEncode, EncodingError};

/// Length of a compressed secp256k1 public key.
pub const PUBLIC_KEY_LENGTH: usize = 33;

const CHECKSUM_LENGTH: usize = 4;

/// Errors that can occur during key operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or out of range")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a compressed secp256k1 point")]
    InvalidPublicKey,

    #[error("public key must start with `{expected}`")]
    WrongPrefix { expected: &'static str },

    #[error("public key is not valid base58")]
    InvalidBase58,

    #[error("public key checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// A secp256k1 signing key.
///
/// Deliberately not `Serialize`: writing a private key out should be an
/// explicit call to [`PrivateKey::to_bytes`], never a side effect of
/// rendering a transaction.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Generates a fresh key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::new(&mut OsRng),
        }
    }

    /// Builds a key from 32 raw secret bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let secret = SecretKey::from_slice(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { secret })
    }

    /// Builds a key from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.trim()).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// Derives the matching public key.
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::signing_only();
        PublicKey::from(secp256k1::PublicKey::from_secret_key(&secp, &self.secret))
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// Public key derivation with a caller-provided context, so signers that
    /// already hold a full context do not build another one.
    pub(crate) fn public_key_with(&self, secp: &Secp256k1<All>) -> PublicKey {
        PublicKey::from(secp256k1::PublicKey::from_secret_key(secp, &self.secret))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// A compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// Validates and wraps 33 compressed-point bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = secp256k1::PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self::from(key))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LENGTH] {
        let digest = ripemd160(bytes);
        let mut checksum = [0u8; CHECKSUM_LENGTH];
        checksum.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
        checksum
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(key: secp256k1::PublicKey) -> Self {
        Self {
            bytes: key.serialize(),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH);
        payload.extend_from_slice(&self.bytes);
        payload.extend_from_slice(&Self::checksum(&self.bytes));
        write!(f, "{}{}", ADDRESS_PREFIX, bs58::encode(payload).into_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoded = s.strip_prefix(ADDRESS_PREFIX).ok_or(KeyError::WrongPrefix {
            expected: ADDRESS_PREFIX,
        })?;
        let payload = bs58::decode(encoded)
            .into_vec()
            .map_err(|_| KeyError::InvalidBase58)?;
        if payload.len() != PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH {
            return Err(KeyError::InvalidPublicKey);
        }
        let (key, checksum) = payload.split_at(PUBLIC_KEY_LENGTH);
        if checksum != Self::checksum(key) {
            return Err(KeyError::ChecksumMismatch);
        }
        Self::from_bytes(key)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for PublicKey {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        buf.extend_from_slice(&self.bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_key() -> PrivateKey {
        PrivateKey::from_bytes(&[7u8; 32]).unwrap()
    }

    #[test]
    fn public_key_text_round_trip() {
        let pk = fixed_key().public_key();
        let text = pk.to_string();
        assert!(text.starts_with("GXC"));
        assert_eq!(text.parse::<PublicKey>().unwrap(), pk);
    }

    #[test]
    fn public_key_is_compressed() {
        let pk = fixed_key().public_key();
        assert_eq!(pk.as_bytes().len(), 33);
        assert!(matches!(pk.as_bytes()[0], 0x02 | 0x03));
        assert_eq!(pk.to_binary().unwrap(), pk.as_bytes().to_vec());
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let text = fixed_key().public_key().to_string().replacen("GXC", "BTS", 1);
        assert_eq!(
            text.parse::<PublicKey>(),
            Err(KeyError::WrongPrefix { expected: "GXC" })
        );
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let pk = fixed_key().public_key();
        let mut payload = pk.as_bytes().to_vec();
        payload.extend_from_slice(&[0, 0, 0, 0]);
        let text = format!("GXC{}", bs58::encode(payload).into_string());
        assert_eq!(text.parse::<PublicKey>(), Err(KeyError::ChecksumMismatch));
    }

    #[test]
    fn invalid_base58_is_rejected() {
        assert_eq!("GXC0OIl".parse::<PublicKey>(), Err(KeyError::InvalidBase58));
    }

    #[test]
    fn private_key_hex_round_trip() {
        let sk = PrivateKey::generate();
        let restored = PrivateKey::from_hex(&hex::encode(sk.to_bytes())).unwrap();
        assert_eq!(sk, restored);
        assert_eq!(sk.public_key(), restored.public_key());
    }

    #[test]
    fn zero_secret_is_rejected() {
        assert_eq!(
            PrivateKey::from_bytes(&[0u8; 32]),
            Err(KeyError::InvalidSecretKey)
        );
        assert_eq!(
            PrivateKey::from_bytes(&[1u8; 31]),
            Err(KeyError::InvalidSecretKey)
        );
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let sk = fixed_key();
        let debug = format!("{sk:?}");
        assert!(!debug.contains(&hex::encode(sk.to_bytes())));
    }

    #[test]
    fn serde_uses_text_form() {
        let pk = fixed_key().public_key();
        let json = serde_json::to_value(pk).unwrap();
        assert_eq!(json, serde_json::Value::String(pk.to_string()));
        let back: PublicKey = serde_json::from_value(json).unwrap();
        assert_eq!(back, pk);
    }
}
