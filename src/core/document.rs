//! Document: the public operation surface over a parsed tree
//!
//! A `Document` owns the root node and exposes query, set, remove, and
//! replace in terms of path strings and located [`Element`]s. Mutations
//! invalidate previously resolved elements; callers must re-resolve.

use log::debug;
use serde::Serialize;

use crate::core::build::{build_structure, splice};
use crate::core::element::Element;
use crate::core::node::{find_by_id, find_by_id_mut, Node, Repr};
use crate::core::path::{Component, Path};
use crate::core::traverse;
use crate::core::value::{node_from_value, node_from_yaml, node_to_value};
use crate::error::{Result, YamlDigError};

/// An owned document tree rooted in a document wrapper node.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wrap an already built tree. The node is wrapped in a document root
    /// unless it is one.
    pub fn new(root: Node) -> Self {
        let root = match root.repr {
            Repr::Document(_) => root,
            _ => Node::document(root),
        };
        Self { root }
    }

    /// Decode a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Self {
            root: Node::document(node_from_yaml(&value)?),
        })
    }

    /// Encode the (possibly mutated) tree back to YAML text.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&node_to_value(&self.root)?)?)
    }

    /// The document root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolve a path against the tree. `Ok(None)` means the path is well
    /// formed but has no matching node.
    pub fn query(&self, path: &str) -> Result<Option<Element>> {
        Ok(traverse::search(path, &self.root)?.map(|(element, _)| element))
    }

    /// Fetch the node a previously resolved element points at. `None` if a
    /// mutation has since detached it.
    pub fn node(&self, element: &Element) -> Option<&Node> {
        find_by_id(&self.root, element.target())
    }

    /// Detach the located node from its locating parent, preserving the
    /// order of the remaining siblings. Removing from a mapping removes the
    /// whole (key, value) pair. The detached node is returned.
    pub fn remove(&mut self, element: &Element) -> Result<Node> {
        let parent_id = element
            .parent()
            .ok_or_else(|| YamlDigError::structural("cannot remove the document root"))?;
        let target = element.target();
        let parent = find_by_id_mut(&mut self.root, parent_id).ok_or_else(|| {
            YamlDigError::structural("element is stale: locating parent no longer in tree")
        })?;
        match &mut parent.repr {
            Repr::Mapping(pairs) => {
                let idx = pairs
                    .iter()
                    .position(|(_, v)| v.id() == target)
                    .ok_or_else(|| {
                        YamlDigError::structural("element not found in its locating parent")
                    })?;
                debug!("removing mapping pair at index {idx}");
                Ok(pairs.remove(idx).1)
            }
            Repr::Sequence(items) => {
                let idx = items
                    .iter()
                    .position(|v| v.id() == target)
                    .ok_or_else(|| {
                        YamlDigError::structural("element not found in its locating parent")
                    })?;
                debug!("removing sequence element at index {idx}");
                Ok(items.remove(idx))
            }
            _ => Err(YamlDigError::structural(format!(
                "cannot remove element from parent of kind {}",
                parent.kind()
            ))),
        }
    }

    /// Resolve a path and remove the node it locates. An absent path is a
    /// [`YamlDigError::NotFound`].
    pub fn remove_path(&mut self, path: &str) -> Result<Node> {
        let element = self
            .query(path)?
            .ok_or_else(|| YamlDigError::not_found(path))?;
        self.remove(&element)
    }

    /// Substitute a new value in place of the located node, at the same
    /// position within its locating parent. Returns an element for the new
    /// node with the same locating chain.
    pub fn replace<T: Serialize>(&mut self, element: &Element, value: T) -> Result<Element> {
        let new_node = node_from_value(&to_yaml_value(value)?)?;
        let new_id = new_node.id();
        let parent_id = element
            .parent()
            .ok_or_else(|| YamlDigError::structural("cannot replace the document root"))?;
        let target = element.target();
        let parent = find_by_id_mut(&mut self.root, parent_id).ok_or_else(|| {
            YamlDigError::structural("element is stale: locating parent no longer in tree")
        })?;
        match &mut parent.repr {
            Repr::Mapping(pairs) => {
                let idx = pairs
                    .iter()
                    .position(|(_, v)| v.id() == target)
                    .ok_or_else(|| {
                        YamlDigError::structural("element not found in its locating parent")
                    })?;
                pairs[idx].1 = new_node;
            }
            Repr::Sequence(items) => {
                let idx = items
                    .iter()
                    .position(|v| v.id() == target)
                    .ok_or_else(|| {
                        YamlDigError::structural("element not found in its locating parent")
                    })?;
                items[idx] = new_node;
            }
            Repr::Document(child) => {
                if child.id() != target {
                    return Err(YamlDigError::structural(
                        "element not found in its locating parent",
                    ));
                }
                **child = new_node;
            }
            _ => {
                return Err(YamlDigError::structural(format!(
                    "cannot replace element within parent of kind {}",
                    parent.kind()
                )))
            }
        }
        Ok(element.with_target(new_id))
    }

    /// Set a value at a path, creating structure as needed.
    ///
    /// If the path resolves, the located node is replaced in place.
    /// Otherwise the walk stops at the deepest resolvable prefix, the
    /// remaining suffix is built bottom-up, and the result is spliced onto
    /// the divergence node: same-kind mappings and sequences merge
    /// additively, a sequence accepts a mismatched subtree as a new element,
    /// and the document root splices into its single child. The returned
    /// element locates the replaced node, or the divergence node when
    /// structure was created.
    pub fn set<T: Serialize>(&mut self, path: &str, value: T) -> Result<Element> {
        let parsed = Path::parse(path)?;
        let value = to_yaml_value(value)?;

        let existing =
            traverse::apply_components(parsed.components(), &self.root).map(|(element, _)| element);
        if let Some(element) = existing {
            debug!("set {path}: path exists, replacing in place");
            return self.replace(&element, value);
        }

        // Advance through existing structure to the divergence point.
        let mut element = Element::root(self.root.id());
        let mut resolved = 0;
        {
            let mut current = &self.root;
            for component in parsed.components() {
                let next = match component {
                    Component::Key(name) => traverse::apply_key(name, current),
                    Component::Selector { field, value } => {
                        traverse::apply_selector(field, value, current)
                    }
                };
                match next {
                    Some(node) => {
                        element = element.descend(node.id());
                        current = node;
                        resolved += 1;
                    }
                    None => break,
                }
            }
        }

        let suffix = &parsed.components()[resolved..];
        debug!(
            "set {path}: creating structure for {} unresolved component(s)",
            suffix.len()
        );
        let built = build_structure(suffix, node_from_value(&value)?)?;
        let splice_point = find_by_id_mut(&mut self.root, element.target())
            .ok_or_else(|| YamlDigError::structural("divergence node no longer in tree"))?;
        splice(splice_point, built)?;
        Ok(element)
    }
}

fn to_yaml_value<T: Serialize>(value: T) -> Result<serde_yaml::Value> {
    serde_yaml::to_value(value)
        .map_err(|e| YamlDigError::value_conversion(format!("unsupported value: {e}")))
}
