//! Value types the transaction header is built from.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::EXPIRATION_FORMAT;
use crate::serialization::binary::{write_u16, write_u32};
use crate::serialization::{BinaryEncode, EncodingError};

// ---------------------------------------------------------------------------
// BlockData
// ---------------------------------------------------------------------------

/// Reference-block and expiration header of a transaction (TaPoS).
///
/// `ref_block_num` is the low 16 bits of a recent block number and
/// `ref_block_prefix` is bytes 4..8 of that block's id read as a
/// little-endian `u32`. `expiration` is seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockData {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: u32,
}

impl BlockData {
    pub fn new(ref_block_num: u16, ref_block_prefix: u32, expiration: u32) -> Self {
        Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
        }
    }

    /// Derives the header from a head block reported by a node.
    ///
    /// `block_id_hex` must decode to at least 8 bytes. Returns `None` when
    /// it does not, or when `now + window` does not fit the 32-bit
    /// expiration.
    pub fn from_head_block(
        head_block_number: u64,
        block_id_hex: &str,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Option<Self> {
        let id = hex::decode(block_id_hex).ok()?;
        let prefix: [u8; 4] = id.get(4..8)?.try_into().ok()?;
        let expiration = u64::try_from(now.timestamp())
            .ok()?
            .checked_add(window.as_secs())?;

        Some(Self {
            ref_block_num: (head_block_number & 0xFFFF) as u16,
            ref_block_prefix: u32::from_le_bytes(prefix),
            expiration: u32::try_from(expiration).ok()?,
        })
    }

    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(i64::from(self.expiration), 0).single()
    }

    /// The expiration in the chain's `YYYY-MM-DDTHH:MM:SS` UTC text form.
    pub fn expiration_text(&self) -> String {
        self.expiration_time()
            .unwrap_or_default()
            .format(EXPIRATION_FORMAT)
            .to_string()
    }

    /// Parses the text form produced by [`BlockData::expiration_text`].
    pub fn parse_expiration(text: &str) -> Option<u32> {
        let naive = chrono::NaiveDateTime::parse_from_str(text, EXPIRATION_FORMAT).ok()?;
        u32::try_from(naive.and_utc().timestamp()).ok()
    }
}

impl BinaryEncode for BlockData {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_u16(self.ref_block_num, buf);
        write_u32(self.ref_block_prefix, buf);
        write_u32(self.expiration, buf);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ChainId
// ---------------------------------------------------------------------------

/// Network identifier. Prefixes every signed payload and txid hash input.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChainId(Vec<u8>);

impl ChainId {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for ChainId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.trim()).map(Self)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({self})")
    }
}
