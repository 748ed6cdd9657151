//! Deserialization helpers for spreadsheet-backed fields.
//!
//! The backing sheet does not keep types stable: identifiers come back as
//! numbers or strings, booleans as real booleans or "TRUE"/"false" text,
//! and numeric columns occasionally as quoted strings. Everything here
//! coerces to the canonical Rust type and trims stray whitespace.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String field that may arrive as a JSON number.
pub fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

/// Optional variant of [`loose_string`]; null and missing both map to `None`.
pub fn loose_string_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => {
            let s = value_to_string(&v);
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        }
    })
}

/// Bool field that may arrive as "true"/"TRUE"/"1" text or a number.
pub fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            s == "true" || s == "1"
        }
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    })
}

/// Integer field that may arrive quoted. Unparseable input maps to zero.
pub fn loose_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().unwrap_or(0) as i32,
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Amount field that may arrive quoted. Unparseable input maps to zero.
pub fn loose_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
