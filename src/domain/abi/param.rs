//! ABI parameter trees and type classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified ABI type tag.
///
/// Resolved once when an `AbiParam` is constructed or deserialized; the
/// interpreter dispatches on this enum instead of re-inspecting the type
/// string on every render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Bool,
    Address,
    String,
    /// `uintN`; bare `uint` is an alias for `uint256`
    Uint(u16),
    /// `intN`; bare `int` is an alias for `int256`
    Int(u16),
    /// Dynamic `bytes`
    Bytes,
    /// `bytesN` for N in 1..=32
    FixedBytes(u8),
    Tuple,
    /// `T[]` or `T[k]`
    Array {
        elem: Box<TypeTag>,
        len: Option<usize>,
    },
    /// Anything unrecognized. Rendered as raw text, never an error.
    Other(String),
}

impl TypeTag {
    /// Classify a type string from an ABI document.
    pub fn parse(ty: &str) -> Self {
        let ty = ty.trim();

        if ty.ends_with(']') {
            if let Some(open) = ty.rfind('[') {
                let suffix = &ty[open + 1..ty.len() - 1];
                let elem = || Box::new(Self::parse(&ty[..open]));
                if suffix.is_empty() {
                    return TypeTag::Array {
                        elem: elem(),
                        len: None,
                    };
                }
                if let Ok(len) = suffix.parse::<usize>() {
                    return TypeTag::Array {
                        elem: elem(),
                        len: Some(len),
                    };
                }
            }
            return TypeTag::Other(ty.to_string());
        }

        match ty {
            "bool" => TypeTag::Bool,
            "address" => TypeTag::Address,
            "string" => TypeTag::String,
            "tuple" => TypeTag::Tuple,
            "bytes" => TypeTag::Bytes,
            "uint" => TypeTag::Uint(256),
            "int" => TypeTag::Int(256),
            _ => {
                if let Some(width) = ty.strip_prefix("uint").and_then(parse_width) {
                    return TypeTag::Uint(width);
                }
                if let Some(width) = ty.strip_prefix("int").and_then(parse_width) {
                    return TypeTag::Int(width);
                }
                if let Some(size) = ty.strip_prefix("bytes").and_then(parse_byte_size) {
                    return TypeTag::FixedBytes(size);
                }
                TypeTag::Other(ty.to_string())
            }
        }
    }

    /// The tag with all array markers stripped.
    pub fn base(&self) -> &TypeTag {
        match self {
            TypeTag::Array { elem, .. } => elem.base(),
            other => other,
        }
    }

    /// Whether this is a tuple or an array of tuples at any depth.
    pub fn is_tuple_like(&self) -> bool {
        matches!(self.base(), TypeTag::Tuple)
    }
}

fn parse_width(digits: &str) -> Option<u16> {
    let width: u16 = digits.parse().ok()?;
    (width >= 8 && width <= 256 && width % 8 == 0).then_some(width)
}

fn parse_byte_size(digits: &str) -> Option<u8> {
    let size: u8 = digits.parse().ok()?;
    (1..=32).contains(&size).then_some(size)
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::String => f.write_str("string"),
            TypeTag::Uint(width) => write!(f, "uint{width}"),
            TypeTag::Int(width) => write!(f, "int{width}"),
            TypeTag::Bytes => f.write_str("bytes"),
            TypeTag::FixedBytes(size) => write!(f, "bytes{size}"),
            TypeTag::Tuple => f.write_str("tuple"),
            TypeTag::Array { elem, len: None } => write!(f, "{elem}[]"),
            TypeTag::Array {
                elem,
                len: Some(len),
            } => write!(f, "{elem}[{len}]"),
            TypeTag::Other(ty) => f.write_str(ty),
        }
    }
}

/// A node in an ABI parameter type tree.
///
/// `components` carries the field definitions when the type is a tuple (or
/// an array of tuples); its order is the single source of truth for matching
/// positional decoded values to field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawParam")]
pub struct AbiParam {
    /// Type string as it appears in the ABI JSON (e.g. "uint256", "tuple[]")
    #[serde(rename = "type")]
    pub kind: String,
    /// Display label; may be empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Tuple field definitions, in declaration order; empty for non-tuples
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    #[serde(skip)]
    tag: TypeTag,
}

impl AbiParam {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_components(kind, name, Vec::new())
    }

    pub fn with_components(
        kind: impl Into<String>,
        name: impl Into<String>,
        components: Vec<AbiParam>,
    ) -> Self {
        let kind = kind.into();
        let tag = TypeTag::parse(&kind);
        Self {
            kind,
            name: name.into(),
            components,
            tag,
        }
    }

    /// Classified type tag, resolved at construction time.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Canonical Solidity type string with tuples expanded into their
    /// parenthesized form, e.g. `(uint256,address)[]`, which is the form
    /// `DynSolType::parse` accepts.
    pub fn solidity_type(&self) -> String {
        if let Some(array_suffix) = self.kind.strip_prefix("tuple") {
            let inner: Vec<String> = self.components.iter().map(|c| c.solidity_type()).collect();
            format!("({}){}", inner.join(","), array_suffix)
        } else {
            self.kind.clone()
        }
    }
}

/// Wire shape of a parameter node. Every field is optional so malformed
/// entries degrade to an `Other` tag instead of a parse failure.
#[derive(Deserialize)]
struct RawParam {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    components: Vec<RawParam>,
}

impl From<RawParam> for AbiParam {
    fn from(raw: RawParam) -> Self {
        AbiParam::with_components(
            raw.kind,
            raw.name,
            raw.components.into_iter().map(Into::into).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_scalars() {
        assert_eq!(TypeTag::parse("bool"), TypeTag::Bool);
        assert_eq!(TypeTag::parse("address"), TypeTag::Address);
        assert_eq!(TypeTag::parse("string"), TypeTag::String);
        assert_eq!(TypeTag::parse("uint256"), TypeTag::Uint(256));
        assert_eq!(TypeTag::parse("uint8"), TypeTag::Uint(8));
        assert_eq!(TypeTag::parse("uint"), TypeTag::Uint(256));
        assert_eq!(TypeTag::parse("int128"), TypeTag::Int(128));
        assert_eq!(TypeTag::parse("bytes"), TypeTag::Bytes);
        assert_eq!(TypeTag::parse("bytes32"), TypeTag::FixedBytes(32));
        assert_eq!(TypeTag::parse("tuple"), TypeTag::Tuple);
    }

    #[test]
    fn test_classify_arrays() {
        assert_eq!(
            TypeTag::parse("uint256[]"),
            TypeTag::Array {
                elem: Box::new(TypeTag::Uint(256)),
                len: None,
            }
        );
        assert_eq!(
            TypeTag::parse("address[4]"),
            TypeTag::Array {
                elem: Box::new(TypeTag::Address),
                len: Some(4),
            }
        );

        let nested = TypeTag::parse("tuple[][]");
        assert!(nested.is_tuple_like());
        assert_eq!(nested.to_string(), "tuple[][]");
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(
            TypeTag::parse("uint512"),
            TypeTag::Other("uint512".to_string())
        );
        assert_eq!(
            TypeTag::parse("bytes33"),
            TypeTag::Other("bytes33".to_string())
        );
        assert_eq!(TypeTag::parse("enum"), TypeTag::Other("enum".to_string()));
        assert_eq!(TypeTag::parse(""), TypeTag::Other(String::new()));
    }

    #[test]
    fn test_param_from_json() {
        let json = r#"{
            "type": "tuple",
            "name": "position",
            "components": [
                { "type": "address", "name": "owner" },
                { "type": "uint256" }
            ]
        }"#;

        let param: AbiParam = serde_json::from_str(json).unwrap();
        assert_eq!(param.tag(), &TypeTag::Tuple);
        assert_eq!(param.components.len(), 2);
        assert_eq!(param.components[0].name, "owner");
        assert_eq!(param.components[1].tag(), &TypeTag::Uint(256));
        assert!(param.components[1].name.is_empty());
    }

    #[test]
    fn test_param_missing_type_degrades() {
        let param: AbiParam = serde_json::from_str(r#"{ "name": "x" }"#).unwrap();
        assert_eq!(param.tag(), &TypeTag::Other(String::new()));
    }

    #[test]
    fn test_param_serializes_type_field() {
        let param = AbiParam::new("uint256", "amount");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "uint256");
        assert_eq!(json["name"], "amount");
        assert!(json.get("components").is_none());
    }

    #[test]
    fn test_solidity_type_expands_tuples() {
        let param = AbiParam::with_components(
            "tuple[]",
            "positions",
            vec![
                AbiParam::new("address", "owner"),
                AbiParam::new("uint256", "amount"),
            ],
        );
        assert_eq!(param.solidity_type(), "(address,uint256)[]");
    }
}
