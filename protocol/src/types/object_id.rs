//! On-chain object ids (`space.type.instance`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ACCOUNT_OBJECT_TYPE, ASSET_OBJECT_TYPE, PROTOCOL_SPACE};
use crate::serialization::{varint, BinaryEncode, DecodingError, EncodingError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid object id `{0}`: expected `space.type.instance`")]
pub struct ParseObjectIdError(String);

/// A reference to a chain object such as an account (`1.2.17`) or an
/// asset (`1.3.0`).
///
/// Only the instance number is serialized in binary; the space and type
/// are implied by the field the id sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub space: u8,
    pub kind: u8,
    pub instance: u64,
}

impl ObjectId {
    pub const fn new(space: u8, kind: u8, instance: u64) -> Self {
        Self {
            space,
            kind,
            instance,
        }
    }

    /// `1.2.<instance>`
    pub const fn account(instance: u64) -> Self {
        Self::new(PROTOCOL_SPACE, ACCOUNT_OBJECT_TYPE, instance)
    }

    /// `1.3.<instance>`
    pub const fn asset(instance: u64) -> Self {
        Self::new(PROTOCOL_SPACE, ASSET_OBJECT_TYPE, instance)
    }

    pub fn is_account(&self) -> bool {
        self.space == PROTOCOL_SPACE && self.kind == ACCOUNT_OBJECT_TYPE
    }

    pub fn is_asset(&self) -> bool {
        self.space == PROTOCOL_SPACE && self.kind == ASSET_OBJECT_TYPE
    }

    /// Passes account ids through; anything else is an invalid `key`.
    pub fn expect_account(self, key: &str) -> Result<Self, DecodingError> {
        if self.is_account() {
            Ok(self)
        } else {
            Err(DecodingError::invalid(key, format!("{self} is not an account id")))
        }
    }

    /// Passes asset ids through; anything else is an invalid `key`.
    pub fn expect_asset(self, key: &str) -> Result<Self, DecodingError> {
        if self.is_asset() {
            Ok(self)
        } else {
            Err(DecodingError::invalid(key, format!("{self} is not an asset id")))
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.kind, self.instance)
    }
}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseObjectIdError(s.to_string());
        let mut parts = s.split('.');
        let (Some(space), Some(kind), Some(instance), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };
        Ok(Self {
            space: space.parse().map_err(|_| err())?,
            kind: kind.parse().map_err(|_| err())?,
            instance: instance.parse().map_err(|_| err())?,
        })
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for ObjectId {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        varint::write(self.instance, buf);
        Ok(())
    }
}
