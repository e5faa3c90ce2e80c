//! Address-mapping document
//!
//! A JSON object mapping file identifiers to contract addresses, e.g.
//! `{ "TokenHelper": "0x74C3Ce17250bC522d2BFBFC3d19E1234D7df7205" }`.

use serde_json::Value;
use thiserror::Error;

use crate::domain::contract::address;

use super::extract::json_type_name;

/// Malformed address-mapping document. Aborts the whole batch: every record
/// needs an address, so there is nothing to salvage.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("address mapping is not a JSON object: {reason}")]
pub struct MappingParseError {
    pub reason: String,
}

/// Outcome of an address lookup for one file identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressLookup {
    /// A well-formed address entry
    Found(String),
    /// No entry for this identifier
    Missing,
    /// An entry exists but is not a 0x-prefixed 40-hex-char string
    Malformed(String),
}

/// Parsed `file identifier -> address` mapping.
#[derive(Debug, Default)]
pub struct AddressMapping {
    entries: serde_json::Map<String, Value>,
}

impl AddressMapping {
    pub fn parse(text: &str) -> Result<Self, MappingParseError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| MappingParseError {
                reason: err.to_string(),
            })?;

        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(MappingParseError {
                reason: format!("expected an object, got {}", json_type_name(&other)),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the address for a file identifier, validating its format.
    pub fn address_for(&self, identifier: &str) -> AddressLookup {
        match self.entries.get(identifier) {
            None => AddressLookup::Missing,
            Some(Value::String(s)) if address::is_well_formed(s) => {
                AddressLookup::Found(s.clone())
            }
            Some(Value::String(s)) => AddressLookup::Malformed(s.clone()),
            Some(other) => AddressLookup::Malformed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let mapping = AddressMapping::parse(
            r#"{ "TokenHelper": "0x74C3Ce17250bC522d2BFBFC3d19E1234D7df7205" }"#,
        )
        .unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(
            mapping.address_for("TokenHelper"),
            AddressLookup::Found("0x74C3Ce17250bC522d2BFBFC3d19E1234D7df7205".to_string())
        );
        assert_eq!(mapping.address_for("Other"), AddressLookup::Missing);
    }

    #[test]
    fn test_malformed_entries() {
        let mapping = AddressMapping::parse(
            r#"{ "Short": "0x1234", "Numeric": 42 }"#,
        )
        .unwrap();
        assert_eq!(
            mapping.address_for("Short"),
            AddressLookup::Malformed("0x1234".to_string())
        );
        assert!(matches!(
            mapping.address_for("Numeric"),
            AddressLookup::Malformed(_)
        ));
    }

    #[test]
    fn test_syntax_error_rejected() {
        // Trailing comma is not valid JSON.
        let err = AddressMapping::parse(r#"{ "A": "0x00", }"#).unwrap_err();
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = AddressMapping::parse("[]").unwrap_err();
        assert!(err.reason.contains("array"));
    }
}
