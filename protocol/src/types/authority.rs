//! Weighted-threshold authorities (the `owner` and `active` permissions of
//! an account).

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::object_id::ObjectId;
use crate::crypto::PublicKey;
use crate::serialization::binary::{write_u16, write_u32};
use crate::serialization::{varint, BinaryEncode, EncodingError};

/// A set of weighted accounts and keys plus the total weight required to
/// act with this authority.
///
/// The chain stores both lists as sorted maps, so the binary form sorts
/// them (accounts by id, keys by their compressed bytes) regardless of the
/// order they were added in. A repeated account or key keeps the weight it
/// was first added with, as a node reading the structured form would.
/// Address authorities are obsolete and always encoded empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: Vec<(ObjectId, u16)>,
    pub key_auths: Vec<(PublicKey, u16)>,
}

impl Authority {
    /// An authority satisfied by a single key.
    pub fn single_key(key: PublicKey) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(key, 1)],
        }
    }

    pub fn with_account(mut self, account: ObjectId, weight: u16) -> Self {
        self.account_auths.push((account, weight));
        self
    }

    pub fn with_key(mut self, key: PublicKey, weight: u16) -> Self {
        self.key_auths.push((key, weight));
        self
    }
}

impl Serialize for Authority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Authority", 4)?;
        state.serialize_field("weight_threshold", &self.weight_threshold)?;
        state.serialize_field("account_auths", &self.account_auths)?;
        state.serialize_field("key_auths", &self.key_auths)?;
        state.serialize_field("address_auths", &[(); 0])?;
        state.end()
    }
}

impl BinaryEncode for Authority {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        write_u32(self.weight_threshold, buf);

        let mut accounts = self.account_auths.clone();
        accounts.sort_by_key(|(id, _)| *id);
        accounts.dedup_by_key(|(id, _)| *id);
        varint::write(accounts.len() as u64, buf);
        for (account, weight) in &accounts {
            account.write_binary(buf)?;
            write_u16(*weight, buf);
        }

        let mut keys = self.key_auths.clone();
        keys.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
        keys.dedup_by(|(a, _), (b, _)| a == b);
        varint::write(keys.len() as u64, buf);
        for (key, weight) in &keys {
            key.write_binary(buf)?;
            write_u16(*weight, buf);
        }

        // address_auths
        varint::write(0, buf);
        Ok(())
    }
}
