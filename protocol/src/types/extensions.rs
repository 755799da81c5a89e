//! The `extensions` slot carried by operations, options and transactions.
//!
//! Reserved for future protocol additions and always empty today: `0x00` in
//! binary (a zero-length set), `[]` in the structured form.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::serialization::{varint, BinaryEncode, EncodingError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extensions;

impl Extensions {
    pub fn to_structured(&self) -> Value {
        Value::Array(Vec::new())
    }
}

impl BinaryEncode for Extensions {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        varint::write(0, buf);
        Ok(())
    }
}

impl Serialize for Extensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(std::iter::empty::<()>())
    }
}

impl<'de> Deserialize<'de> for Extensions {
    /// Accepts any array; unknown extension entries are dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<IgnoredAny>::deserialize(deserializer)?;
        Ok(Extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_empty() {
        assert_eq!(Extensions.to_binary().unwrap(), vec![0x00]);
        assert_eq!(serde_json::to_value(Extensions).unwrap(), json!([]));
        assert_eq!(Extensions.to_structured(), json!([]));
    }

    #[test]
    fn decode_requires_an_array() {
        assert!(serde_json::from_value::<Extensions>(json!([])).is_ok());
        assert!(serde_json::from_value::<Extensions>(json!({})).is_err());
    }
}
