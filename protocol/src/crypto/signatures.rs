//! # Transaction Signatures
//!
//! Graphene-family chains sign `SHA-256(chain_id ‖ transaction bytes)` with
//! secp256k1 and ship the result as a 65-byte compact recoverable
//! signature: one header byte (`27 + 4 + recovery id`, the `4` marking a
//! compressed key) followed by `r` and `s`.
//!
//! On top of cryptographic validity the chain only accepts *canonical*
//! signatures, where neither `r` nor `s` has its top bit set or carries a
//! redundant leading zero byte. RFC 6979 signing is deterministic, so a
//! rejected payload can only be retried by changing the payload itself; the
//! transaction layer does that by nudging the expiration (see
//! [`crate::transaction::signing`]).
//!
//! The [`SigningService`] trait is the seam between the transaction and the
//! curve. [`EcdsaSigner`] is the production implementation; tests plug in
//! stubs to drive the retry loop deterministically.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use std::fmt;
use thiserror::Error;

use super::hash::sha256_array;
use super::keys::{PrivateKey, PublicKey};

/// Length of a compact recoverable signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Header byte offset for a recoverable signature over a compressed key.
const COMPACT_HEADER_BASE: u8 = 27 + 4;

/// Errors during signature operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid signature bytes: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid signature header byte {0:#04x}")]
    InvalidHeader(u8),

    #[error("invalid signature hex: {0}")]
    InvalidHex(String),

    #[error("public key recovery failed")]
    RecoveryFailed,

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// Raw signature bytes as produced by a [`SigningService`].
///
/// No length is enforced here so alternative services (and test stubs) can
/// use their own formats; [`EcdsaSigner`] always produces
/// [`SIGNATURE_LENGTH`] bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(s).map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex, the form carried in a transaction's `signatures` list.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Produces signatures over transaction payloads and decides which of them
/// the chain will accept.
pub trait SigningService {
    /// Signs `payload` with `key`.
    fn sign(&self, payload: &[u8], key: &PrivateKey) -> Result<Signature, SignatureError>;

    /// Whether the chain will accept `signature` in addition to it being
    /// cryptographically valid.
    fn is_acceptable(&self, signature: &Signature) -> bool;
}

/// secp256k1 signer producing Graphene compact recoverable signatures.
pub struct EcdsaSigner {
    secp: Secp256k1<All>,
}

impl EcdsaSigner {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Recovers the public key that produced `signature` over `payload`.
    ///
    /// Nodes authenticate transactions this way, so a successful recovery to
    /// the expected key is the end-to-end check that a signature is usable.
    pub fn recover_public_key(
        &self,
        payload: &[u8],
        signature: &Signature,
    ) -> Result<PublicKey, SignatureError> {
        let bytes = signature.as_bytes();
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let header = bytes[0];
        let recid = header
            .checked_sub(COMPACT_HEADER_BASE)
            .filter(|id| *id < 4)
            .ok_or(SignatureError::InvalidHeader(header))?;
        let recid =
            RecoveryId::from_i32(i32::from(recid)).map_err(|_| SignatureError::InvalidHeader(header))?;
        let recoverable = RecoverableSignature::from_compact(&bytes[1..], recid)
            .map_err(|_| SignatureError::RecoveryFailed)?;
        let message = Message::from_digest(sha256_array(payload));
        self.secp
            .recover_ecdsa(&message, &recoverable)
            .map(PublicKey::from)
            .map_err(|_| SignatureError::RecoveryFailed)
    }

    /// The public key this signer would attach to signatures made with `key`.
    pub fn public_key(&self, key: &PrivateKey) -> PublicKey {
        key.public_key_with(&self.secp)
    }
}

impl Default for EcdsaSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SigningService for EcdsaSigner {
    fn sign(&self, payload: &[u8], key: &PrivateKey) -> Result<Signature, SignatureError> {
        let message = Message::from_digest(sha256_array(payload));
        let recoverable = self.secp.sign_ecdsa_recoverable(&message, key.secret());
        let (recid, compact) = recoverable.serialize_compact();
        let recid = u8::try_from(recid.to_i32())
            .map_err(|_| SignatureError::SigningFailed("recovery id out of range".into()))?;

        let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH);
        bytes.push(COMPACT_HEADER_BASE + recid);
        bytes.extend_from_slice(&compact);
        Ok(Signature::from_bytes(bytes))
    }

    fn is_acceptable(&self, signature: &Signature) -> bool {
        is_canonical(signature.as_bytes())
    }
}

/// Graphene's canonical-signature rule over a 65-byte compact signature.
///
/// `r` occupies bytes 1..33 and `s` bytes 33..65. Each must read as a
/// positive, minimally encoded DER integer: no top bit on its first byte,
/// and no zero first byte unless the next byte has its top bit set.
pub fn is_canonical(sig: &[u8]) -> bool {
    if sig.len() != SIGNATURE_LENGTH {
        return false;
    }
    let minimal_positive = |first: u8, second: u8| first & 0x80 == 0 && !(first == 0 && second & 0x80 == 0);
    minimal_positive(sig[1], sig[2]) && minimal_positive(sig[33], sig[34])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PrivateKey {
        PrivateKey::from_bytes(&[42u8; 32]).unwrap()
    }

    #[test]
    fn signature_layout() {
        let signer = EcdsaSigner::new();
        let sig = signer.sign(b"payload", &key()).unwrap();
        assert_eq!(sig.as_bytes().len(), SIGNATURE_LENGTH);
        assert!((31..=34).contains(&sig.as_bytes()[0]));
        assert_eq!(sig.to_hex().len(), 130);
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = EcdsaSigner::new();
        let a = signer.sign(b"same bytes", &key()).unwrap();
        let b = signer.sign(b"same bytes", &key()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn recovers_signer_public_key() {
        let signer = EcdsaSigner::new();
        let sk = key();
        let sig = signer.sign(b"recover me", &sk).unwrap();
        let recovered = signer.recover_public_key(b"recover me", &sig).unwrap();
        assert_eq!(recovered, sk.public_key());
        assert_eq!(signer.public_key(&sk), sk.public_key());
    }

    #[test]
    fn recovery_over_other_payload_yields_other_key() {
        let signer = EcdsaSigner::new();
        let sk = key();
        let sig = signer.sign(b"original", &sk).unwrap();
        match signer.recover_public_key(b"tampered", &sig) {
            Ok(pk) => assert_ne!(pk, sk.public_key()),
            Err(e) => assert_eq!(e, SignatureError::RecoveryFailed),
        }
    }

    #[test]
    fn recovery_rejects_bad_input() {
        let signer = EcdsaSigner::new();
        assert_eq!(
            signer.recover_public_key(b"x", &Signature::from_bytes(vec![0u8; 64])),
            Err(SignatureError::InvalidLength(64))
        );
        let mut bytes = vec![0x01u8; SIGNATURE_LENGTH];
        bytes[0] = 27;
        assert_eq!(
            signer.recover_public_key(b"x", &Signature::from_bytes(bytes)),
            Err(SignatureError::InvalidHeader(27))
        );
    }

    #[test]
    fn canonical_rule() {
        let mut sig = [0x11u8; SIGNATURE_LENGTH];
        sig[0] = 31;
        assert!(is_canonical(&sig));

        // High bit on r.
        let mut high_r = sig;
        high_r[1] = 0x80;
        assert!(!is_canonical(&high_r));

        // Redundant zero padding on s.
        let mut padded_s = sig;
        padded_s[33] = 0x00;
        padded_s[34] = 0x7f;
        assert!(!is_canonical(&padded_s));

        // Zero byte is fine when the next one needs it.
        let mut needed_zero = sig;
        needed_zero[33] = 0x00;
        needed_zero[34] = 0x80;
        assert!(is_canonical(&needed_zero));

        assert!(!is_canonical(&sig[..64]));
    }

    #[test]
    fn hex_round_trip() {
        let sig = EcdsaSigner::new().sign(b"hex", &key()).unwrap();
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
        assert!(matches!(
            Signature::from_hex("zz"),
            Err(SignatureError::InvalidHex(_))
        ));
    }
}
