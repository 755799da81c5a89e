//! Helpers for reading keyed fields out of the structured (JSON) wire form.
//!
//! Every accessor reports the offending key, so a rejected transaction can
//! be traced back to the exact field a node or caller got wrong.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::error::DecodingError;

/// Views `value` as a JSON object.
pub fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, DecodingError> {
    value
        .as_object()
        .ok_or_else(|| DecodingError::UnexpectedShape(format!("{what} must be a JSON object")))
}

/// Views `value` as a JSON array.
pub fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, DecodingError> {
    value
        .as_array()
        .ok_or_else(|| DecodingError::UnexpectedShape(format!("{what} must be a JSON array")))
}

/// Returns the raw value under `key`.
pub fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a Value, DecodingError> {
    fields
        .get(key)
        .ok_or_else(|| DecodingError::MissingKey(key.to_string()))
}

/// Deserializes the value under `key`.
pub fn parse<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Result<T, DecodingError> {
    let raw = field(fields, key)?;
    T::deserialize(raw).map_err(|e| DecodingError::invalid(key, e))
}

/// Deserializes the value under `key`, treating an absent key or `null` as `None`.
pub fn parse_optional<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &str,
) -> Result<Option<T>, DecodingError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => T::deserialize(raw)
            .map(Some)
            .map_err(|e| DecodingError::invalid(key, e)),
    }
}

/// Reads an unsigned integer that nodes may send either as a JSON number or
/// as a decimal string (64-bit amounts do not survive a JavaScript double).
pub fn u64_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
