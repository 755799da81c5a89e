//! Account options: memo key and governance votes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::extensions::Extensions;
use super::object_id::ObjectId;
use crate::crypto::PublicKey;
use crate::serialization::binary::{write_u16, write_u32};
use crate::serialization::{varint, BinaryEncode, EncodingError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid vote id `{0}`: expected `type:instance` with instance below 2^24")]
pub struct ParseVoteIdError(String);

/// A vote for a committee member, witness or worker, written `type:instance`.
///
/// Packed into a single `u32` on the wire: the type in the low 8 bits, the
/// instance in the upper 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoteId {
    packed: u32,
}

impl VoteId {
    const MAX_INSTANCE: u32 = (1 << 24) - 1;

    /// Returns `None` when `instance` does not fit in 24 bits.
    pub fn new(vote_type: u8, instance: u32) -> Option<Self> {
        (instance <= Self::MAX_INSTANCE).then(|| Self {
            packed: (instance << 8) | u32::from(vote_type),
        })
    }

    pub fn vote_type(&self) -> u8 {
        (self.packed & 0xff) as u8
    }

    pub fn instance(&self) -> u32 {
        self.packed >> 8
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vote_type(), self.instance())
    }
}

impl FromStr for VoteId {
    type Err = ParseVoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVoteIdError(s.to_string());
        let (vote_type, instance) = s.split_once(':').ok_or_else(err)?;
        let vote_type = vote_type.parse().map_err(|_| err())?;
        let instance = instance.parse().map_err(|_| err())?;
        Self::new(vote_type, instance).ok_or_else(err)
    }
}

impl Serialize for VoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BinaryEncode for VoteId {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_u32(self.packed, buf);
        Ok(())
    }
}

/// Options attached to an account at creation and changeable by update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOptions {
    pub memo_key: PublicKey,
    pub voting_account: ObjectId,
    pub num_witness: u16,
    pub num_committee: u16,
    #[serde(default)]
    pub votes: Vec<VoteId>,
    #[serde(default)]
    pub extensions: Extensions,
}

impl AccountOptions {
    /// Options with no votes, delegating voting to `voting_account`.
    pub fn new(memo_key: PublicKey, voting_account: ObjectId) -> Self {
        Self {
            memo_key,
            voting_account,
            num_witness: 0,
            num_committee: 0,
            votes: Vec::new(),
            extensions: Extensions,
        }
    }
}

impl BinaryEncode for AccountOptions {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.memo_key.write_binary(buf)?;
        self.voting_account.write_binary(buf)?;
        write_u16(self.num_witness, buf);
        write_u16(self.num_committee, buf);

        let mut votes = self.votes.clone();
        votes.sort();
        votes.dedup();
        varint::write(votes.len() as u64, buf);
        for vote in &votes {
            vote.write_binary(buf)?;
        }

        self.extensions.write_binary(buf)
    }
}
