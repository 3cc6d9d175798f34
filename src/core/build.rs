//! Bottom-up construction of absent path structure
//!
//! When `set` diverges from the existing tree, the unresolved suffix is
//! synthesized here as a minimal nested structure and spliced onto the
//! deepest node that did resolve.

use crate::core::node::{Node, Repr};
use crate::core::path::Component;
use crate::error::{Result, YamlDigError};

/// Build the nested structure for an absent path suffix terminated by a
/// concrete value.
///
/// The terminal component wraps the value directly: a key produces
/// `{name: value}`; a selector produces a one-element sequence holding a
/// mapping whose first pair is the selector's (field, value) equality, with
/// the supplied value's own pairs following. Remaining components fold
/// right to left: keys wrap in a single-pair mapping, selectors wrap in a
/// one-element sequence only — an interior selector's equality pair is not
/// re-embedded.
pub(crate) fn build_structure(suffix: &[Component], value: Node) -> Result<Node> {
    let (last, rest) = suffix.split_last().ok_or_else(|| {
        YamlDigError::structural("structure builder received an empty path suffix")
    })?;

    let mut built = match last {
        Component::Key(name) => Node::mapping(vec![(Node::str(name), value)]),
        Component::Selector {
            field,
            value: sel_value,
        } => {
            let mut pairs = vec![(Node::str(field), Node::str(sel_value))];
            match value.repr {
                Repr::Mapping(value_pairs) => pairs.extend(value_pairs),
                _ => {
                    return Err(YamlDigError::value_conversion(format!(
                        "cannot embed {} value under selector ({field}=...)",
                        value.kind()
                    )))
                }
            }
            Node::sequence(vec![Node::mapping(pairs)])
        }
    };

    for component in rest.iter().rev() {
        built = match component {
            Component::Key(name) => Node::mapping(vec![(Node::str(name), built)]),
            Component::Selector { .. } => Node::sequence(vec![built]),
        };
    }

    Ok(built)
}

/// Splice a freshly built subtree onto an existing node.
///
/// Same-kind targets merge additively: mappings extend their pairs,
/// sequences their elements. A sequence accepts a mismatched built node as a
/// new element; a document root splices into its single child. The shape
/// therefore depends on what already exists at the splice point — that
/// asymmetry is part of the contract and relied upon by existing documents.
pub(crate) fn splice(target: &mut Node, built: Node) -> Result<()> {
    match &mut target.repr {
        Repr::Document(child) => splice(child, built),
        Repr::Mapping(pairs) => match built.repr {
            Repr::Mapping(new_pairs) => {
                pairs.extend(new_pairs);
                Ok(())
            }
            _ => Err(YamlDigError::structural(format!(
                "cannot splice {} into a mapping",
                built.kind()
            ))),
        },
        Repr::Sequence(items) => {
            match built.repr {
                Repr::Sequence(new_items) => items.extend(new_items),
                _ => items.push(built),
            }
            Ok(())
        }
        Repr::Scalar { .. } => Err(YamlDigError::structural(format!(
            "cannot splice into a scalar of kind {}",
            target.kind()
        ))),
    }
}
