//! Located nodes: a traversal result plus its locating-parent trail
//!
//! An `Element` is produced fresh by every traversal and is valid only until
//! the next structural mutation of the same tree. It records identities, not
//! references, so the persistent tree stays free of parent pointers.

use crate::core::node::NodeId;

/// A resolved node paired with the chain of node identities that located it,
/// root first. The locating parent is the previous traversal step's node,
/// which for a top-level value is the document root rather than the mapping
/// that structurally contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    parents: Vec<NodeId>,
    target: NodeId,
}

impl Element {
    pub(crate) fn root(id: NodeId) -> Self {
        Self {
            parents: Vec::new(),
            target: id,
        }
    }

    /// A new element one step deeper, with the current target as its
    /// locating parent.
    pub(crate) fn descend(&self, id: NodeId) -> Self {
        let mut parents = self.parents.clone();
        parents.push(self.target);
        Self {
            parents,
            target: id,
        }
    }

    /// The located element with its target swapped for a replacement node.
    pub(crate) fn with_target(&self, id: NodeId) -> Self {
        Self {
            parents: self.parents.clone(),
            target: id,
        }
    }

    /// Identity of the located node
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Identity of the locating parent, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parents.last().copied()
    }

    /// Number of locating steps back to the root
    pub fn depth(&self) -> usize {
        self.parents.len()
    }
}
