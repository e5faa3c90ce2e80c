//! ABI extraction strategies
//!
//! Two strategies tried in order: a source-embedded
//! `export const <name>ABI = [ ... ] as const;` literal, then the whole
//! content as a JSON array. Each strategy reports a tagged outcome so a
//! third strategy can be added without touching the others.

use serde_json::Value;
use thiserror::Error;

use crate::domain::abi::AbiEntry;

/// Per-file ABI extraction failure. Reported per file, never aborts a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("no ABI literal matching `export const <name>ABI = [...] as const;`")]
    LiteralMismatch,

    #[error("invalid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("expected a JSON array of ABI entries, got {got}")]
    NotAnArray { got: &'static str },

    #[error("malformed ABI entry: {reason}")]
    InvalidEntry { reason: String },
}

/// Outcome of a single extraction strategy.
enum Extraction {
    /// The strategy applied and produced an entry list
    Extracted(Vec<AbiEntry>),
    /// The strategy does not apply to this content; try the next one
    NotApplicable,
    /// The strategy applied but the content is malformed
    Failed(ExtractionError),
}

const EXPORT_MARKER: &str = "export const";
const ABI_MARKER: &str = "ABI";
const LITERAL_TAIL: &str = "] as const;";

/// Extract an ABI entry list from uploaded file content.
pub fn extract_abi(content: &str) -> Result<Vec<AbiEntry>, ExtractionError> {
    for strategy in [source_literal, plain_json] {
        match strategy(content) {
            Extraction::Extracted(entries) => return Ok(entries),
            Extraction::NotApplicable => continue,
            Extraction::Failed(error) => return Err(error),
        }
    }
    // plain_json always applies, so this is unreachable in practice.
    Err(ExtractionError::LiteralMismatch)
}

/// Derive a file identifier by stripping a recognized source extension.
pub fn file_identifier(name: &str) -> String {
    for ext in [".ts", ".js", ".json"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    name.to_string()
}

/// Strategy 1: a TypeScript/JavaScript source file with an embedded
/// `as const` ABI literal.
fn source_literal(content: &str) -> Extraction {
    if !(content.contains(EXPORT_MARKER) && content.contains(ABI_MARKER)) {
        return Extraction::NotApplicable;
    }
    let Some(array_text) = find_literal_array(content) else {
        return Extraction::Failed(ExtractionError::LiteralMismatch);
    };
    match parse_entry_array(array_text) {
        Ok(entries) => Extraction::Extracted(entries),
        Err(error) => Extraction::Failed(error),
    }
}

/// Strategy 2: the whole content is a JSON array. Always applicable.
fn plain_json(content: &str) -> Extraction {
    match parse_entry_array(content) {
        Ok(entries) => Extraction::Extracted(entries),
        Err(error) => Extraction::Failed(error),
    }
}

/// Capture the bracketed array text of the first declaration shaped like
/// `export const <name>ABI = [ ... ] as const;`. The capture is non-greedy:
/// it ends at the first `] as const;` after the opening bracket.
fn find_literal_array(content: &str) -> Option<&str> {
    for (start, _) in content.match_indices(EXPORT_MARKER) {
        let rest = content[start + EXPORT_MARKER.len()..].trim_start();

        let ident_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        if !rest[..ident_len].ends_with(ABI_MARKER) {
            continue;
        }

        let after_ident = rest[ident_len..].trim_start();
        let Some(after_eq) = after_ident.strip_prefix('=') else {
            continue;
        };
        let after_eq = after_eq.trim_start();
        if !after_eq.starts_with('[') {
            continue;
        }

        if let Some(end) = after_eq.find(LITERAL_TAIL) {
            return Some(&after_eq[..end + 1]);
        }
    }
    None
}

fn parse_entry_array(text: &str) -> Result<Vec<AbiEntry>, ExtractionError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ExtractionError::InvalidJson {
            reason: err.to_string(),
        })?;

    let Value::Array(items) = value else {
        return Err(ExtractionError::NotAnArray {
            got: json_type_name(&value),
        });
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<AbiEntry>(item).map_err(|err| {
                ExtractionError::InvalidEntry {
                    reason: err.to_string(),
                }
            })
        })
        .collect()
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_JSON: &str = r#"[
        { "type": "function", "name": "helper", "inputs": [], "outputs": [] }
    ]"#;

    #[test]
    fn test_plain_json_array() {
        let entries = extract_abi(RAW_JSON).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "helper");
    }

    #[test]
    fn test_source_literal_matches_raw_json() {
        let source = format!(
            "import type {{ Abi }} from \"viem\";\n\nexport const TokenHelperABI = {} as const;\n",
            RAW_JSON
        );
        assert_eq!(extract_abi(&source).unwrap(), extract_abi(RAW_JSON).unwrap());
    }

    #[test]
    fn test_literal_without_tail_fails() {
        let source = "export const FooABI = [ { \"type\": \"function\" } ];";
        assert_eq!(
            extract_abi(source).unwrap_err(),
            ExtractionError::LiteralMismatch
        );
    }

    #[test]
    fn test_markers_present_but_no_abi_ident() {
        // Mentions ABI somewhere, but the exported name does not end in ABI:
        // the literal strategy applies (both markers present) and fails.
        let source = "// ABI helpers\nexport const helpers = [1] as const;";
        assert_eq!(
            extract_abi(source).unwrap_err(),
            ExtractionError::LiteralMismatch
        );
    }

    #[test]
    fn test_invalid_json_reports_failure() {
        let err = extract_abi("{ not json").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidJson { .. }));
    }

    #[test]
    fn test_non_array_json_reports_failure() {
        let err = extract_abi(r#"{ "abi": [] }"#).unwrap_err();
        assert_eq!(err, ExtractionError::NotAnArray { got: "object" });
    }

    #[test]
    fn test_non_object_entry_reports_failure() {
        let err = extract_abi("[1, 2]").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidEntry { .. }));
    }

    #[test]
    fn test_file_identifier() {
        assert_eq!(file_identifier("TokenHelper.json"), "TokenHelper");
        assert_eq!(file_identifier("TokenHelper.ts"), "TokenHelper");
        assert_eq!(file_identifier("TokenHelper.js"), "TokenHelper");
        assert_eq!(file_identifier("TokenHelper.sol"), "TokenHelper.sol");
    }
}
