//! yamldig: query, mutate, and extend unstructured YAML documents
//!
//! This library lets you work with YAML documents of unknown shape without
//! defining matching structs. A compact path language resolves values by
//! mapping key or by a field-equality selector within a sequence, and the
//! same paths drive in-place mutation with automatic structure creation.
//!
//! # Path language
//!
//! Components are separated by dots. A plain component selects a mapping
//! entry by key; a `(field='value')` component selects the first sequence
//! element whose `field` entry equals `value`. A backslash escapes the next
//! character.
//!
//! ```text
//! users.(name='josie').roles
//! ```
//!
//! # Querying
//!
//! ```
//! use yamldig::Document;
//!
//! let doc = Document::from_yaml_str(
//!     "users:\n- name: josie\n  roles: [bot, foo, bar]\n- name: lester\n  roles: [dummy]\n",
//! )?;
//!
//! let element = doc.query("users.(name='josie').roles")?.expect("present");
//! let roles = doc.node(&element).and_then(|n| n.as_str_slice());
//! assert_eq!(roles, Some(vec!["bot", "foo", "bar"]));
//! # Ok::<(), yamldig::YamlDigError>(())
//! ```
//!
//! # Mutating
//!
//! `set` replaces existing values in place and builds any missing structure,
//! including selector components:
//!
//! ```
//! use yamldig::Document;
//!
//! let mut doc = Document::from_yaml_str("usersCount: 2\n")?;
//! doc.set("users.(name='josie').roles", vec!["bot"])?;
//! // ...except that deep selector suffixes keep only their terminal shape;
//! // create the entry first when you need the equality field present:
//! doc.set("admins.(name='josie')", std::collections::BTreeMap::from([("admin", true)]))?;
//!
//! let element = doc.query("admins.(name='josie')")?.expect("created");
//! let admin = doc.node(&element).and_then(|n| n.get("admin")).and_then(|n| n.as_bool());
//! assert_eq!(admin, Some(true));
//! # Ok::<(), yamldig::YamlDigError>(())
//! ```
//!
//! `remove` and `replace` operate on previously resolved elements; elements
//! are invalidated by any mutation and must be re-resolved afterwards.
//!
//! # Architecture
//!
//! - [`core`]: the tree node abstraction, path parser, traversal, structure
//!   builder, and the [`Document`] operation surface
//! - [`io`]: file helpers for the CLI binary
//! - [`error`]: the [`YamlDigError`] taxonomy
//!
//! The core is synchronous and free of I/O; concurrent reads of an
//! unmodified document are safe, while mutation requires exclusive access.

pub mod args;
pub mod core;
pub mod error;
pub mod io;

pub use crate::core::{
    Component, Document, ElemKind, Element, Kind, Node, NodeId, Path, ScalarKind, SequenceKind,
};
pub use crate::error::{Result, YamlDigError};
