//! Loose scalar decoding for write payloads.
//!
//! Clients send whatever JSON scalar they have at hand (`"1990"` for a year,
//! `42` for a name). Anything that converts cleanly is accepted the way the
//! storage engine's column affinity would accept it. Only values with no
//! sensible conversion are rejected.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

fn number_to_i64(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Integer column: accepts numbers with no fractional part, numeric strings,
/// booleans (as 0/1) and null.
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => number_to_i64(&n)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{} is not an integer", n))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<Number>().ok().as_ref().and_then(number_to_i64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("{:?} is not an integer", s)))
        }
        Some(Value::Bool(b)) => Ok(Some(i64::from(b))),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, found {}",
            other
        ))),
    }
}

/// Text column: accepts strings, numbers and booleans in their JSON spelling,
/// and null.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}
