//! Explicit coercion of loosely typed input into record fields
//!
//! Numeric fields accept JSON integers, integral floats and strings holding
//! a base-10 integer. Everything else is rejected with `StaError::InvalidNumber`
//! rather than being turned into a sentinel value.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::errors::{Result, StaError};

/// Coerce a loosely typed value into an integer field
pub fn coerce_int(field: &str, value: &Value) -> Result<i64> {
    let invalid = || StaError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f)
                    if f.is_finite()
                        && f.fract() == 0.0
                        && f >= i64::MIN as f64
                        && f < i64::MAX as f64 =>
                {
                    Ok(f as i64)
                }
                _ => Err(invalid()),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// View a loose value as a JSON object
pub(crate) fn as_object<'a>(record: &'a str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| StaError::InvalidField {
        field: record.to_string(),
        reason: format!("expected an object, got {}", value),
    })
}

/// Read a required string field
pub(crate) fn required_str(obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(StaError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(StaError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

/// Read a required integer field
pub(crate) fn required_int(obj: &Map<String, Value>, field: &str) -> Result<i64> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(StaError::MissingField {
            field: field.to_string(),
        }),
        Some(value) => coerce_int(field, value),
    }
}

/// Read an integer field that falls back to `default` when absent
pub(crate) fn int_or(obj: &Map<String, Value>, field: &str, default: i64) -> Result<i64> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => coerce_int(field, value),
    }
}

/// Read an optional integer key
pub(crate) fn optional_int(obj: &Map<String, Value>, field: &str) -> Result<Option<i64>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_int(field, value).map(Some),
    }
}

/// Read an optional base64-encoded blob
pub(crate) fn optional_blob(obj: &Map<String, Value>, field: &str) -> Result<Option<Vec<u8>>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(encoded)) => {
            STANDARD
                .decode(encoded)
                .map(Some)
                .map_err(|e| StaError::InvalidField {
                    field: field.to_string(),
                    reason: format!("invalid base64: {}", e),
                })
        }
        Some(other) => Err(StaError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a base64 string, got {}", other),
        }),
    }
}
