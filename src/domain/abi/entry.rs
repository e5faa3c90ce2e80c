//! Function and event entries of a contract ABI document

use serde::{Deserialize, Serialize};

use super::AbiParam;

/// One entry of an ABI JSON array (function, event, constructor, ...).
///
/// Every known field is optional and unrecognized fields ride along in
/// `extra`, so entries survive a serialize round trip intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbiEntry {
    /// Entry kind: "function", "event", "constructor", ...
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<AbiParam>,
    /// Passthrough for fields this crate does not interpret
    /// (stateMutability, anonymous, indexed markers, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AbiEntry {
    pub fn is_function(&self) -> bool {
        self.kind == "function"
    }

    pub fn is_event(&self) -> bool {
        self.kind == "event"
    }

    /// Selector-style signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.inputs.iter().map(|p| p.solidity_type()).collect();
        format!("{}({})", self.name, params.join(","))
    }
}
