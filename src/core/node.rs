//! Generic document tree: tagged nodes with stable identities
//!
//! The tree mirrors what a YAML parser produces: scalars carry a type tag
//! and their literal text, mappings are ordered (key, value) pairs, and the
//! root is wrapped in a document node with a single child. Every node gets
//! an opaque identity at construction so that mutations can find "this exact
//! node" inside its parent without pointer comparison.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque, stable identity for a node, assigned at construction and never
/// derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Type tag of a scalar node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    Int,
    Float,
    Bool,
    Null,
}

/// One node of the generic document representation.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    pub(crate) repr: Repr,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Repr {
    Scalar { kind: ScalarKind, text: String },
    /// Ordered (key-scalar, value) pairs. Duplicate keys are kept; lookups
    /// return the first match.
    Mapping(Vec<(Node, Node)>),
    Sequence(Vec<Node>),
    /// Root wrapper around exactly one child; present only at the tree root.
    Document(Box<Node>),
}

// YAML 1.1 boolean literal sets, as the reference YAML decoder accepts them.
const YAML_TRUE: &[&str] = &[
    "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON",
];
const YAML_FALSE: &[&str] = &[
    "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF",
];

impl Node {
    pub(crate) fn new(repr: Repr) -> Self {
        Self {
            id: NodeId::next(),
            repr,
        }
    }

    /// Create a string scalar
    pub fn str(s: impl Into<String>) -> Self {
        Self::new(Repr::Scalar {
            kind: ScalarKind::Str,
            text: s.into(),
        })
    }

    /// Create an integer scalar
    pub fn int(i: i64) -> Self {
        Self::new(Repr::Scalar {
            kind: ScalarKind::Int,
            text: i.to_string(),
        })
    }

    /// Create a float scalar
    pub fn float(f: f64) -> Self {
        Self::new(Repr::Scalar {
            kind: ScalarKind::Float,
            text: f.to_string(),
        })
    }

    /// Create a boolean scalar
    pub fn bool(b: bool) -> Self {
        Self::new(Repr::Scalar {
            kind: ScalarKind::Bool,
            text: if b { "true" } else { "false" }.to_string(),
        })
    }

    /// Create a null scalar
    pub fn null() -> Self {
        Self::new(Repr::Scalar {
            kind: ScalarKind::Null,
            text: "null".to_string(),
        })
    }

    /// Create a mapping from ordered (key, value) pairs
    pub fn mapping(pairs: Vec<(Node, Node)>) -> Self {
        Self::new(Repr::Mapping(pairs))
    }

    /// Create a sequence from ordered values
    pub fn sequence(items: Vec<Node>) -> Self {
        Self::new(Repr::Sequence(items))
    }

    /// Wrap a node as the single child of a document root
    pub fn document(child: Node) -> Self {
        Self::new(Repr::Document(Box::new(child)))
    }

    /// This node's stable identity
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Literal text of any scalar, regardless of its tag
    pub fn scalar_text(&self) -> Option<&str> {
        match &self.repr {
            Repr::Scalar { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The string value, if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            Repr::Scalar {
                kind: ScalarKind::Str,
                text,
            } => Some(text),
            _ => None,
        }
    }

    /// The integer value, if this is an int scalar (floats are truncated)
    pub fn as_i64(&self) -> Option<i64> {
        match &self.repr {
            Repr::Scalar {
                kind: ScalarKind::Int,
                text,
            } => text.parse().ok(),
            Repr::Scalar {
                kind: ScalarKind::Float,
                text,
            } => text.parse::<f64>().ok().map(|f| f as i64),
            _ => None,
        }
    }

    /// The float value, if this is a float scalar (ints are widened)
    pub fn as_f64(&self) -> Option<f64> {
        match &self.repr {
            Repr::Scalar {
                kind: ScalarKind::Float,
                text,
            } => text.parse().ok(),
            Repr::Scalar {
                kind: ScalarKind::Int,
                text,
            } => text.parse::<i64>().ok().map(|i| i as f64),
            _ => None,
        }
    }

    /// The boolean value, if this is a bool scalar with a YAML 1.1 literal
    pub fn as_bool(&self) -> Option<bool> {
        let text = match &self.repr {
            Repr::Scalar {
                kind: ScalarKind::Bool,
                text,
            } => text.as_str(),
            _ => return None,
        };
        bool_from_literal(text)
    }

    /// Whether this is a null scalar
    pub fn is_null(&self) -> bool {
        matches!(
            self.repr,
            Repr::Scalar {
                kind: ScalarKind::Null,
                ..
            }
        )
    }

    /// The ordered (key, value) pairs, if this is a mapping
    pub fn as_mapping(&self) -> Option<&[(Node, Node)]> {
        match &self.repr {
            Repr::Mapping(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// The ordered values, if this is a sequence
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.repr {
            Repr::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// First-match lookup of a mapping key by its literal text
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k.scalar_text() == Some(key))
            .map(|(_, v)| v)
    }

    /// A vector of string values, if this is a homogeneous string sequence
    pub fn as_str_slice(&self) -> Option<Vec<&str>> {
        self.homogeneous_items(ElemKind::Str)?
            .iter()
            .map(Node::as_str)
            .collect()
    }

    /// A vector of integers, if this is a homogeneous int sequence
    pub fn as_i64_slice(&self) -> Option<Vec<i64>> {
        self.homogeneous_items(ElemKind::Int)?
            .iter()
            .map(Node::as_i64)
            .collect()
    }

    /// A vector of floats, if this is a homogeneous float sequence
    pub fn as_f64_slice(&self) -> Option<Vec<f64>> {
        self.homogeneous_items(ElemKind::Float)?
            .iter()
            .map(Node::as_f64)
            .collect()
    }

    /// A vector of booleans, if this is a homogeneous bool sequence
    pub fn as_bool_slice(&self) -> Option<Vec<bool>> {
        self.homogeneous_items(ElemKind::Bool)?
            .iter()
            .map(Node::as_bool)
            .collect()
    }

    fn homogeneous_items(&self, elem: ElemKind) -> Option<&[Node]> {
        match self.kind() {
            Kind::Sequence(SequenceKind::Of(e)) if e == elem => self.as_sequence(),
            Kind::Sequence(SequenceKind::Empty) => self.as_sequence(),
            _ => None,
        }
    }

    /// The derived kind of this node, computed on demand
    pub fn kind(&self) -> Kind {
        match &self.repr {
            Repr::Scalar { kind, .. } => match kind {
                ScalarKind::Str => Kind::Str,
                ScalarKind::Int => Kind::Int,
                ScalarKind::Float => Kind::Float,
                ScalarKind::Bool => Kind::Bool,
                ScalarKind::Null => Kind::Null,
            },
            Repr::Mapping(_) => Kind::Mapping,
            Repr::Sequence(items) => Kind::Sequence(sequence_kind(items)),
            Repr::Document(_) => Kind::Document,
        }
    }
}

pub(crate) fn bool_from_literal(text: &str) -> Option<bool> {
    if YAML_TRUE.contains(&text) {
        Some(true)
    } else if YAML_FALSE.contains(&text) {
        Some(false)
    } else {
        None
    }
}

/// A clone is a fresh subtree: node identities are re-assigned so that two
/// structurally equal trees never share ids.
impl Clone for Node {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Scalar { kind, text } => Repr::Scalar {
                kind: *kind,
                text: text.clone(),
            },
            Repr::Mapping(pairs) => {
                Repr::Mapping(pairs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            }
            Repr::Sequence(items) => Repr::Sequence(items.to_vec()),
            Repr::Document(child) => Repr::Document(child.clone()),
        };
        Self::new(repr)
    }
}

/// Structural equality; identities are ignored.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

/// The derived semantic type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Str,
    Int,
    Float,
    Bool,
    Null,
    Mapping,
    Sequence(SequenceKind),
    Document,
}

impl Kind {
    pub fn is_mapping(&self) -> bool {
        matches!(self, Kind::Mapping)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Kind::Sequence(_))
    }
}

/// Element classification of a sequence, derived from its children's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// No children, so no derivable element kind
    Empty,
    /// All children share this one kind
    Of(ElemKind),
    /// Children of differing kinds
    Mixed,
}

/// The top-level tag of a sequence element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemKind {
    Str,
    Int,
    Float,
    Bool,
    Null,
    Mapping,
    Sequence,
}

fn elem_kind(node: &Node) -> ElemKind {
    match &node.repr {
        Repr::Scalar { kind, .. } => match kind {
            ScalarKind::Str => ElemKind::Str,
            ScalarKind::Int => ElemKind::Int,
            ScalarKind::Float => ElemKind::Float,
            ScalarKind::Bool => ElemKind::Bool,
            ScalarKind::Null => ElemKind::Null,
        },
        Repr::Mapping(_) => ElemKind::Mapping,
        Repr::Sequence(_) | Repr::Document(_) => ElemKind::Sequence,
    }
}

fn sequence_kind(items: &[Node]) -> SequenceKind {
    let mut iter = items.iter().map(elem_kind);
    let first = match iter.next() {
        Some(k) => k,
        None => return SequenceKind::Empty,
    };
    if iter.all(|k| k == first) {
        SequenceKind::Of(first)
    } else {
        SequenceKind::Mixed
    }
}

impl fmt::Display for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElemKind::Str => "string",
            ElemKind::Int => "int",
            ElemKind::Float => "float",
            ElemKind::Bool => "bool",
            ElemKind::Null => "null",
            ElemKind::Mapping => "mapping",
            ElemKind::Sequence => "sequence",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Str => write!(f, "string"),
            Kind::Int => write!(f, "int"),
            Kind::Float => write!(f, "float"),
            Kind::Bool => write!(f, "bool"),
            Kind::Null => write!(f, "null"),
            Kind::Mapping => write!(f, "mapping"),
            Kind::Document => write!(f, "document"),
            Kind::Sequence(SequenceKind::Empty) => write!(f, "empty sequence"),
            Kind::Sequence(SequenceKind::Of(e)) => write!(f, "sequence of {e}"),
            Kind::Sequence(SequenceKind::Mixed) => write!(f, "mixed sequence"),
        }
    }
}

/// Depth-first search for a node by identity.
pub(crate) fn find_by_id<'a>(node: &'a Node, id: NodeId) -> Option<&'a Node> {
    if node.id == id {
        return Some(node);
    }
    match &node.repr {
        Repr::Scalar { .. } => None,
        Repr::Mapping(pairs) => pairs
            .iter()
            .find_map(|(k, v)| find_by_id(k, id).or_else(|| find_by_id(v, id))),
        Repr::Sequence(items) => items.iter().find_map(|v| find_by_id(v, id)),
        Repr::Document(child) => find_by_id(child, id),
    }
}

pub(crate) fn find_by_id_mut<'a>(node: &'a mut Node, id: NodeId) -> Option<&'a mut Node> {
    if node.id == id {
        return Some(node);
    }
    match &mut node.repr {
        Repr::Scalar { .. } => None,
        Repr::Mapping(pairs) => {
            for (k, v) in pairs {
                if let Some(found) = find_by_id_mut(k, id) {
                    return Some(found);
                }
                if let Some(found) = find_by_id_mut(v, id) {
                    return Some(found);
                }
            }
            None
        }
        Repr::Sequence(items) => {
            for v in items {
                if let Some(found) = find_by_id_mut(v, id) {
                    return Some(found);
                }
            }
            None
        }
        Repr::Document(child) => find_by_id_mut(child, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_per_construction() {
        let a = Node::str("x");
        let b = Node::str("x");
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn clone_reassigns_ids() {
        let a = Node::sequence(vec![Node::int(1), Node::int(2)]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.id(), b.id());
        let a_first = a.as_sequence().unwrap()[0].id();
        let b_first = b.as_sequence().unwrap()[0].id();
        assert_ne!(a_first, b_first);
    }

    #[test]
    fn scalar_coercions() {
        assert_eq!(Node::str("hi").as_str(), Some("hi"));
        assert_eq!(Node::int(42).as_i64(), Some(42));
        assert_eq!(Node::int(42).as_f64(), Some(42.0));
        assert_eq!(Node::float(1.5).as_f64(), Some(1.5));
        assert_eq!(Node::float(1.5).as_i64(), Some(1));
        assert_eq!(Node::bool(true).as_bool(), Some(true));
        assert!(Node::null().is_null());
        // Typed failure, not guessing
        assert_eq!(Node::int(42).as_str(), None);
        assert_eq!(Node::str("42").as_i64(), None);
    }

    #[test]
    fn yaml_11_bool_literals() {
        let yes = Node::new(Repr::Scalar {
            kind: ScalarKind::Bool,
            text: "Yes".to_string(),
        });
        assert_eq!(yes.as_bool(), Some(true));
        let off = Node::new(Repr::Scalar {
            kind: ScalarKind::Bool,
            text: "off".to_string(),
        });
        assert_eq!(off.as_bool(), Some(false));
        let odd = Node::new(Repr::Scalar {
            kind: ScalarKind::Bool,
            text: "definitely".to_string(),
        });
        assert_eq!(odd.as_bool(), None);
    }

    #[test]
    fn mapping_lookup_is_first_match() {
        let map = Node::mapping(vec![
            (Node::str("a"), Node::int(1)),
            (Node::str("a"), Node::int(2)),
        ]);
        assert_eq!(map.get("a").and_then(Node::as_i64), Some(1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn sequence_kind_classification() {
        let homo = Node::sequence(vec![Node::str("a"), Node::str("b")]);
        assert_eq!(homo.kind(), Kind::Sequence(SequenceKind::Of(ElemKind::Str)));
        assert_eq!(homo.kind().to_string(), "sequence of string");

        let mixed = Node::sequence(vec![Node::str("a"), Node::int(1)]);
        assert_eq!(mixed.kind(), Kind::Sequence(SequenceKind::Mixed));
        assert_eq!(mixed.kind().to_string(), "mixed sequence");

        let empty = Node::sequence(vec![]);
        assert_eq!(empty.kind(), Kind::Sequence(SequenceKind::Empty));
    }

    #[test]
    fn typed_slice_views() {
        let roles = Node::sequence(vec![Node::str("bot"), Node::str("foo")]);
        assert_eq!(roles.as_str_slice(), Some(vec!["bot", "foo"]));
        assert_eq!(roles.as_i64_slice(), None);

        let nums = Node::sequence(vec![Node::int(1), Node::int(2)]);
        assert_eq!(nums.as_i64_slice(), Some(vec![1, 2]));
    }

    #[test]
    fn find_by_id_reaches_nested_nodes() {
        let inner = Node::str("deep");
        let inner_id = inner.id();
        let root = Node::document(Node::mapping(vec![(
            Node::str("a"),
            Node::sequence(vec![inner]),
        )]));
        let found = find_by_id(&root, inner_id).unwrap();
        assert_eq!(found.as_str(), Some("deep"));
        assert!(find_by_id(&root, NodeId::next()).is_none());
    }
}
