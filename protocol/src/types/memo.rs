//! Transfer memos.
//!
//! The message is carried already encrypted; producing the ciphertext from
//! a shared secret is left to the wallet.

use serde::{Deserialize, Serialize};

use crate::crypto::PublicKey;
use crate::serialization::binary::{write_u64, write_var_bytes};
use crate::serialization::structured::u64_from_number_or_string;
use crate::serialization::{BinaryEncode, EncodingError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub from: PublicKey,
    pub to: PublicKey,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub nonce: u64,
    /// Ciphertext, hex in the structured form.
    #[serde(with = "hex::serde")]
    pub message: Vec<u8>,
}

impl BinaryEncode for Memo {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.from.write_binary(buf)?;
        self.to.write_binary(buf)?;
        write_u64(self.nonce, buf);
        write_var_bytes(&self.message, buf);
        Ok(())
    }
}
