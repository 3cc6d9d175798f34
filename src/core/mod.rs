//! Core types and algorithms: the tree node abstraction, path parsing,
//! traversal, structure building, and the mutating document surface.

pub(crate) mod build;
pub mod document;
pub mod element;
pub mod node;
pub mod path;
pub(crate) mod traverse;
pub(crate) mod value;

pub use document::Document;
pub use element::Element;
pub use node::{ElemKind, Kind, Node, NodeId, ScalarKind, SequenceKind};
pub use path::{Component, Path};
