//! ABI value interpreter
//!
//! Maps a decoded value and its parameter descriptor onto a [`DisplayNode`].
//! Total over its inputs: every unexpected shape resolves to a fallback node
//! instead of an error, so rendering can never block the caller.

use crate::domain::abi::{AbiParam, DecodedValue, TypeTag};

use super::node::{DisplayNode, LabeledField, ListItem};

/// Render `value` according to `tag`, with `param` supplying tuple field
/// definitions when available.
pub fn render(tag: &TypeTag, value: &DecodedValue, param: Option<&AbiParam>) -> DisplayNode {
    match tag {
        TypeTag::Bool => render_bool(value),
        TypeTag::Address => render_address(value),
        TypeTag::Uint(_) | TypeTag::Int(_) | TypeTag::String => {
            DisplayNode::text(value.to_string())
        }
        TypeTag::Bytes | TypeTag::FixedBytes(_) => DisplayNode::breakable_text(value.to_string()),
        TypeTag::Tuple => render_tuple(value, param),
        TypeTag::Array { elem, .. } => render_array(elem, value, param),
        TypeTag::Other(_) => DisplayNode::text(value.to_string()),
    }
}

/// Render with the parameter's own classified tag.
pub fn render_param(param: &AbiParam, value: &DecodedValue) -> DisplayNode {
    render(param.tag(), value, Some(param))
}

fn render_bool(value: &DecodedValue) -> DisplayNode {
    match value {
        DecodedValue::Bool(b) => DisplayNode::Boolean { value: *b },
        DecodedValue::Scalar(s) if s == "true" || s == "false" => DisplayNode::Boolean {
            value: s == "true",
        },
        other => DisplayNode::text(other.to_string()),
    }
}

fn render_address(value: &DecodedValue) -> DisplayNode {
    match value {
        DecodedValue::Scalar(s) => DisplayNode::Address { value: s.clone() },
        other => DisplayNode::text(other.to_string()),
    }
}

/// Tuple labeling: zip component definitions against positional values.
///
/// Field names come from the component, or `field<i>` when unnamed. A length
/// mismatch leaves the extra positions out; it is not an error. Without
/// usable components, or for a non-sequence value, the whole value falls
/// back to an unlabeled raw tree.
fn render_tuple(value: &DecodedValue, param: Option<&AbiParam>) -> DisplayNode {
    let components = param.map(|p| p.components.as_slice()).unwrap_or(&[]);
    let Some(items) = value.as_sequence() else {
        return DisplayNode::RawTree {
            value: value.clone(),
        };
    };
    if components.is_empty() {
        return DisplayNode::RawTree {
            value: value.clone(),
        };
    }

    let fields = components
        .iter()
        .zip(items)
        .enumerate()
        .map(|(index, (component, item))| LabeledField {
            name: field_label(component, index),
            node: render_param(component, item),
        })
        .collect();

    DisplayNode::LabeledTree { fields }
}

fn render_array(elem: &TypeTag, value: &DecodedValue, param: Option<&AbiParam>) -> DisplayNode {
    let Some(items) = value.as_sequence() else {
        return DisplayNode::text(value.to_string());
    };

    // `param` rides along so tuple elements keep their field definitions.
    let items = items
        .iter()
        .map(|item| ListItem {
            ty: elem.to_string(),
            node: render(elem, item, param),
        })
        .collect();

    DisplayNode::ListTree { items }
}

fn field_label(component: &AbiParam, index: usize) -> String {
    if component.name.trim().is_empty() {
        format!("field{index}")
    } else {
        component.name.clone()
    }
}
