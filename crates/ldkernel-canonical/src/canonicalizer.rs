use serde::Serialize;
use serde_json::{Map, Value};

use crate::finite::ensure_finite;

/// Error returned when a value cannot be brought into canonical form.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The value has no JSON representation (non-string map keys, a failing
    /// `Serialize` impl, ...).
    #[error("value cannot be encoded as JSON: {0}")]
    Encode(String),
    /// Non-finite number (NaN/Infinity) detected at the given path.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
}

impl CanonicalizationError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CanonicalizationError::Encode(_) | CanonicalizationError::NonFiniteNumber(_) => {
                "ENCODE_ERROR"
            }
        }
    }
}

impl From<serde_json::Error> for CanonicalizationError {
    fn from(err: serde_json::Error) -> Self {
        CanonicalizationError::Encode(err.to_string())
    }
}

/// Returns a copy of `value` with every object's keys sorted by codepoint
/// order, at every depth.
///
/// Array element order is never changed; arrays are treated as ordered
/// sequences. Scalars are copied verbatim.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            // Fix this object's key order first, then descend into each value.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, child) in entries {
                sorted.insert(key.clone(), canonicalize(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// Serializes the canonical form of `value`.
///
/// `pretty` switches to two-space indentation without affecting key order,
/// so `stable_stringify(v, true)` and `stable_stringify(v, false)` always
/// parse back to equal values.
pub fn stable_stringify(value: &Value, pretty: bool) -> Result<String, CanonicalizationError> {
    write_layout(&canonicalize(value), pretty)
}

/// Like [`stable_stringify`], for any serde-serializable value.
///
/// Values with no JSON representation fail with
/// [`CanonicalizationError::Encode`], and NaN or infinite floats with
/// [`CanonicalizationError::NonFiniteNumber`], rather than being truncated.
pub fn stable_stringify_serialize<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> Result<String, CanonicalizationError> {
    stable_stringify(&to_json_value(value)?, pretty)
}

/// Converts `value` to a JSON tree, rejecting non-finite floats that
/// `serde_json` would otherwise write as `null`.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, CanonicalizationError> {
    ensure_finite(value)?;
    Ok(serde_json::to_value(value)?)
}

/// Compact canonical UTF-8 bytes, the input to content digests.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    Ok(stable_stringify(value, false)?.into_bytes())
}

fn write_layout(canonical: &Value, pretty: bool) -> Result<String, CanonicalizationError> {
    let text = if pretty {
        serde_json::to_string_pretty(canonical)?
    } else {
        serde_json::to_string(canonical)?
    };
    Ok(text)
}
