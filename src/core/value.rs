//! Conversion between `serde_yaml` values and tree nodes
//!
//! Two directions with different key policies: document ingestion keeps any
//! scalar-keyed mapping the decoder produced, while values supplied to
//! set/replace must use string keys only.

use crate::core::node::{bool_from_literal, Node, Repr, ScalarKind};
use crate::error::{Result, YamlDigError};
use serde_yaml::Value;

fn scalar_from_value(value: &Value) -> Option<Node> {
    match value {
        Value::Null => Some(Node::null()),
        Value::Bool(b) => Some(Node::bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Node::int(i))
            } else {
                n.as_f64().map(Node::float)
            }
        }
        Value::String(s) => Some(Node::str(s)),
        _ => None,
    }
}

/// Convert a decoded YAML document into the tree shape. Mapping keys may be
/// any scalar; composite keys and tagged values are rejected.
pub(crate) fn node_from_yaml(value: &Value) -> Result<Node> {
    if let Some(scalar) = scalar_from_value(value) {
        return Ok(scalar);
    }
    match value {
        Value::Sequence(items) => Ok(Node::sequence(
            items.iter().map(node_from_yaml).collect::<Result<_>>()?,
        )),
        Value::Mapping(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (k, v) in map {
                let key = scalar_from_value(k).ok_or_else(|| {
                    YamlDigError::value_conversion("mapping key is not a scalar")
                })?;
                pairs.push((key, node_from_yaml(v)?));
            }
            Ok(Node::mapping(pairs))
        }
        Value::Tagged(tagged) => Err(YamlDigError::value_conversion(format!(
            "unsupported YAML tag {}",
            tagged.tag
        ))),
        _ => Err(YamlDigError::value_conversion(
            "unrepresentable YAML value",
        )),
    }
}

/// Convert a caller-supplied value into a tree node. Unsupported composite
/// types and non-string mapping keys are conversion errors.
pub(crate) fn node_from_value(value: &Value) -> Result<Node> {
    if let Some(scalar) = scalar_from_value(value) {
        return Ok(scalar);
    }
    match value {
        Value::Sequence(items) => Ok(Node::sequence(
            items.iter().map(node_from_value).collect::<Result<_>>()?,
        )),
        Value::Mapping(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (k, v) in map {
                let key = k.as_str().ok_or_else(|| {
                    YamlDigError::value_conversion(format!(
                        "cannot build mapping with non-string key {k:?}"
                    ))
                })?;
                pairs.push((Node::str(key), node_from_value(v)?));
            }
            Ok(Node::mapping(pairs))
        }
        Value::Tagged(tagged) => Err(YamlDigError::value_conversion(format!(
            "cannot build node from tagged value {}",
            tagged.tag
        ))),
        _ => Err(YamlDigError::value_conversion(
            "cannot build node from unsupported value",
        )),
    }
}

/// Render a node back into a `serde_yaml` value for encoding. Document
/// wrappers are transparent.
pub(crate) fn node_to_value(node: &Node) -> Result<Value> {
    match &node.repr {
        Repr::Scalar { kind, text } => scalar_to_value(*kind, text),
        Repr::Mapping(pairs) => {
            let mut map = serde_yaml::Mapping::with_capacity(pairs.len());
            for (k, v) in pairs {
                map.insert(node_to_value(k)?, node_to_value(v)?);
            }
            Ok(Value::Mapping(map))
        }
        Repr::Sequence(items) => Ok(Value::Sequence(
            items.iter().map(node_to_value).collect::<Result<_>>()?,
        )),
        Repr::Document(child) => node_to_value(child),
    }
}

impl Node {
    /// Render this node as a `serde_yaml::Value` — the generic coercion
    /// escape hatch when no typed accessor fits.
    pub fn to_value(&self) -> Result<Value> {
        node_to_value(self)
    }
}

fn scalar_to_value(kind: ScalarKind, text: &str) -> Result<Value> {
    match kind {
        ScalarKind::Str => Ok(Value::String(text.to_string())),
        ScalarKind::Null => Ok(Value::Null),
        ScalarKind::Int => text.parse::<i64>().map(Value::from).map_err(|_| {
            YamlDigError::value_conversion(format!("invalid int literal {text:?}"))
        }),
        ScalarKind::Float => text.parse::<f64>().map(Value::from).map_err(|_| {
            YamlDigError::value_conversion(format!("invalid float literal {text:?}"))
        }),
        ScalarKind::Bool => bool_from_literal(text).map(Value::Bool).ok_or_else(|| {
            YamlDigError::value_conversion(format!("invalid bool literal {text:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::Kind;

    #[test]
    fn scalars_round_trip() {
        for text in ["42", "1.5", "true", "null", "hello"] {
            let value: Value = serde_yaml::from_str(text).unwrap();
            let node = node_from_yaml(&value).unwrap();
            assert_eq!(node_to_value(&node).unwrap(), value);
        }
    }

    #[test]
    fn int_and_float_tags_are_distinguished() {
        let int: Value = serde_yaml::from_str("3").unwrap();
        assert_eq!(node_from_yaml(&int).unwrap().kind(), Kind::Int);
        let float: Value = serde_yaml::from_str("3.5").unwrap();
        assert_eq!(node_from_yaml(&float).unwrap().kind(), Kind::Float);
    }

    #[test]
    fn mapping_order_is_preserved() {
        let value: Value = serde_yaml::from_str("b: 1\na: 2\nc: 3").unwrap();
        let node = node_from_yaml(&value).unwrap();
        let keys: Vec<_> = node
            .as_mapping()
            .unwrap()
            .iter()
            .map(|(k, _)| k.scalar_text().unwrap().to_string())
            .collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn ingestion_accepts_non_string_scalar_keys() {
        let value: Value = serde_yaml::from_str("1: one\ntrue: yes").unwrap();
        assert!(node_from_yaml(&value).is_ok());
    }

    #[test]
    fn build_rejects_non_string_keys() {
        let value: Value = serde_yaml::from_str("1: one").unwrap();
        assert!(matches!(
            node_from_value(&value),
            Err(YamlDigError::ValueConversion { .. })
        ));
    }

    #[test]
    fn tagged_values_are_conversion_errors() {
        let value: Value = serde_yaml::from_str("!custom thing").unwrap();
        assert!(matches!(
            node_from_value(&value),
            Err(YamlDigError::ValueConversion { .. })
        ));
    }
}
