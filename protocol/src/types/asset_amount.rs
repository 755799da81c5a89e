//! Amounts of a given asset, used for fees and transfers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::object_id::ObjectId;
use crate::serialization::binary::write_u64;
use crate::serialization::structured::u64_from_number_or_string;
use crate::serialization::{BinaryEncode, EncodingError};

/// An integer amount in the asset's smallest unit.
///
/// # Examples
///
/// ```
/// use gxc_protocol::types::{AssetAmount, ObjectId};
///
/// let fee = AssetAmount::new(1_000, ObjectId::asset(1));
/// assert_eq!(fee.to_string(), "1000 1.3.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub amount: u64,
    pub asset_id: ObjectId,
}

impl AssetAmount {
    pub fn new(amount: u64, asset_id: ObjectId) -> Self {
        Self { amount, asset_id }
    }

    /// A zero amount of `asset_id`; the usual placeholder fee before the
    /// real one is looked up.
    pub fn zero(asset_id: ObjectId) -> Self {
        Self::new(0, asset_id)
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset_id)
    }
}

impl BinaryEncode for AssetAmount {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_u64(self.amount, buf);
        self.asset_id.write_binary(buf)
    }
}
