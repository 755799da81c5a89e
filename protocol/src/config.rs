//! # Protocol Configuration & Constants
//!
//! Every magic number the encoder and signer depend on lives here. Most of
//! them are fixed by the chain; changing one produces transactions the
//! network will reject.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// GXChain mainnet chain id. Prefixes every signed payload.
pub const MAINNET_CHAIN_ID: &str = "4f7d07969c446f8342033acb3ab2ae5044cbe0fde93db02de75bd17fa8fd84b8";

/// Prefix of the textual public key form, e.g. `GXC6MRyAjQ...`.
pub const ADDRESS_PREFIX: &str = "GXC";

/// The chain's core asset, in which fees are usually paid.
pub const CORE_ASSET_ID: &str = "1.3.1";

// ---------------------------------------------------------------------------
// Object Id Spaces
// ---------------------------------------------------------------------------

/// Protocol object space (`1.x.y`).
pub const PROTOCOL_SPACE: u8 = 1;

/// Object type of accounts within the protocol space (`1.2.y`).
pub const ACCOUNT_OBJECT_TYPE: u8 = 2;

/// Object type of assets within the protocol space (`1.3.y`).
pub const ASSET_OBJECT_TYPE: u8 = 3;

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// How far in the future a freshly built transaction expires.
pub const DEFAULT_EXPIRATION_WINDOW: Duration = Duration::from_secs(120);

/// Upper bound on sign-and-check rounds before giving up. Each round moves
/// the expiration one second later, so this also caps the drift.
pub const MAX_SIGNING_ATTEMPTS: u32 = 300;

/// Textual expiration format, always UTC with second precision.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Transaction ids are the SHA-256 digest truncated to this many bytes.
pub const TXID_LENGTH: usize = 20;

/// Upper bound on `referrer_percent`, expressed in hundredths of a percent.
pub const MAX_PERCENT: u16 = 10_000;

/// Returns the chain id for a well-known network name.
/// Returns `None` for anything else; custom networks pass their id directly.
pub fn chain_id_for_network(network: &str) -> Option<&'static str> {
    match network.to_ascii_lowercase().as_str() {
        "mainnet" => Some(MAINNET_CHAIN_ID),
        _ => None,
    }
}
