//! Decoded runtime values

use serde::Serialize;
use std::fmt;

/// A decoded on-chain value, paired at render time with the `AbiParam` that
/// explains its shape.
///
/// Numeric scalars are carried as their verbatim string form: decoded
/// magnitudes routinely exceed native integer range and must not be rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Bool(bool),
    /// Scalar text: numeric strings, addresses, byte strings, plain strings
    Scalar(String),
    /// Ordered sequence: array elements or positional tuple fields
    Sequence(Vec<DecodedValue>),
    /// Labeled fields, order-preserving
    Mapping(Vec<(String, DecodedValue)>),
}

impl DecodedValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        DecodedValue::Scalar(value.into())
    }

    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for DecodedValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DecodedValue::Scalar(String::new()),
            serde_json::Value::Bool(b) => DecodedValue::Bool(b),
            serde_json::Value::Number(n) => DecodedValue::Scalar(n.to_string()),
            serde_json::Value::String(s) => DecodedValue::Scalar(s),
            serde_json::Value::Array(items) => {
                DecodedValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => {
                DecodedValue::Mapping(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Compact single-line form: `[a, b]` for sequences, `{k: v}` for mappings.
impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Bool(b) => write!(f, "{b}"),
            DecodedValue::Scalar(s) => f.write_str(s),
            DecodedValue::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            DecodedValue::Mapping(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}
