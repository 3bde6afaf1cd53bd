//! Lenient field deserializers. The backend relays upstream IPTV panel data,
//! which is inconsistent about quoting numeric fields.

use std::collections::BTreeMap;

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn number_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(D::Error::custom("expected string or number")),
    }
}

pub(crate) fn optional_number_as_string<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(D::Error::custom("expected string, number, or null")),
    }
}

/// Accepts a season map, or an empty array which the backend sends for
/// series without episodes.
pub(crate) fn map_or_empty_array<'de, D, T>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Array(arr) if arr.is_empty() => Ok(BTreeMap::new()),
        value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Err(D::Error::custom("expected season map")),
    }
}
