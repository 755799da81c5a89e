//! Transaction signing.
//!
//! RFC 6979 signatures are deterministic, so when the chain rejects one as
//! non-canonical the only way to get a different signature is to change
//! the payload. The search below does that by moving the expiration one
//! second forward per rejected attempt, up to the transaction's attempt
//! bound.
//!
//! ```text
//! Unsigned ──sign──▶ Searching{attempt} ──accepted──▶ Signed(sig)
//!                          │  ▲
//!                rejected: │  │ expiration += 1
//!                          ▼  │
//!                    (bound reached) ──▶ Exhausted{attempts}
//! ```
//!
//! Any mutator on [`Transaction`] returns it to `Unsigned`.

use tracing::{debug, warn};

use super::builder::Transaction;
use super::error::TransactionError;
use crate::crypto::{EcdsaSigner, Signature, SigningService};

/// Where a transaction stands in the signing protocol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SigningState {
    #[default]
    Unsigned,
    /// A search is in progress; `attempt` is 1-based.
    Searching { attempt: u32 },
    Signed(Signature),
    Exhausted { attempts: u32 },
}

impl Transaction {
    /// Signs with the secp256k1 [`EcdsaSigner`].
    pub fn sign(&mut self) -> Result<Signature, TransactionError> {
        self.sign_with(&EcdsaSigner::new())
    }

    /// Runs the bounded signing search with `service`.
    ///
    /// Returns the cached signature when the transaction is already signed.
    /// On success the expiration reflects every bump the search made; on
    /// exhaustion it has moved forward by the full attempt bound.
    pub fn sign_with<S>(&mut self, service: &S) -> Result<Signature, TransactionError>
    where
        S: SigningService + ?Sized,
    {
        if let Some(signature) = self.signature() {
            return Ok(signature.clone());
        }
        let key = self
            .private_key
            .clone()
            .ok_or(TransactionError::MissingPrivateKey)?;

        let bound = self.max_signing_attempts;
        for attempt in 1..=bound {
            self.state = SigningState::Searching { attempt };

            let outcome = self
                .to_bytes()
                .and_then(|payload| service.sign(&payload, &key).map_err(Into::into));
            let signature = match outcome {
                Ok(signature) => signature,
                Err(e) => {
                    self.state = SigningState::Unsigned;
                    return Err(e);
                }
            };

            if service.is_acceptable(&signature) {
                debug!(
                    attempt,
                    expiration = self.block_data.expiration,
                    "found acceptable signature"
                );
                self.state = SigningState::Signed(signature.clone());
                return Ok(signature);
            }

            debug!(
                attempt,
                expiration = self.block_data.expiration,
                "signature rejected, moving expiration forward"
            );
            self.block_data.expiration = self.block_data.expiration.wrapping_add(1);
        }

        warn!(attempts = bound, "no acceptable signature within the attempt bound");
        self.state = SigningState::Exhausted { attempts: bound };
        Err(TransactionError::SigningExhausted { attempts: bound })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
