//! Display trees handed to the rendering collaborator

use serde::Serialize;

use crate::domain::abi::DecodedValue;

/// One labeled field of a tuple display tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledField {
    pub name: String,
    pub node: DisplayNode,
}

/// One element of an array display tree. Arrays show their element types,
/// unlike tuples, which hide them behind field labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Element type label, e.g. "uint256"
    pub ty: String,
    pub node: DisplayNode,
}

/// UI-agnostic description of how a decoded value should be presented.
///
/// The surrounding UI owns widgets, theming, and address
/// checksumming/shortening; this type only fixes the structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DisplayNode {
    Boolean {
        value: bool,
    },
    Address {
        value: String,
    },
    /// Plain text. `break_anywhere` permits wrapping on arbitrary
    /// characters; byte strings have no word boundaries to break on.
    ScalarText {
        value: String,
        break_anywhere: bool,
    },
    /// Labeled tuple fields in declaration order; editable in the inspector.
    LabeledTree {
        fields: Vec<LabeledField>,
    },
    /// Unlabeled fallback for shapes the type tree cannot explain;
    /// read-only.
    RawTree {
        value: DecodedValue,
    },
    ListTree {
        items: Vec<ListItem>,
    },
}

impl DisplayNode {
    pub fn text(value: impl Into<String>) -> Self {
        DisplayNode::ScalarText {
            value: value.into(),
            break_anywhere: false,
        }
    }

    pub fn breakable_text(value: impl Into<String>) -> Self {
        DisplayNode::ScalarText {
            value: value.into(),
            break_anywhere: true,
        }
    }

    /// Whether the inspector should allow editing this node.
    pub fn editable(&self) -> bool {
        matches!(self, DisplayNode::LabeledTree { .. })
    }
}
