//! Path resolution against a document tree
//!
//! A strict left-to-right walk: each component is applied to the result of
//! the previous one, short-circuiting on the first miss. The walk builds the
//! located element's parent trail as it goes.

use crate::core::element::Element;
use crate::core::node::{Node, Repr};
use crate::core::path::{Component, Path};
use crate::error::Result;

/// Apply a key component. Document roots are traversed through into their
/// single child; mappings are scanned in order with first match winning.
pub(crate) fn apply_key<'a>(name: &str, node: &'a Node) -> Option<&'a Node> {
    match &node.repr {
        Repr::Document(child) => apply_key(name, child),
        Repr::Mapping(pairs) => pairs
            .iter()
            .find(|(k, _)| k.scalar_text() == Some(name))
            .map(|(_, v)| v),
        _ => None,
    }
}

/// Apply a selector component: the first sequence element whose `field`
/// entry is a scalar with literal text equal to `value`.
pub(crate) fn apply_selector<'a>(field: &str, value: &str, node: &'a Node) -> Option<&'a Node> {
    match &node.repr {
        Repr::Document(child) => apply_selector(field, value, child),
        Repr::Sequence(items) => items
            .iter()
            .find(|item| apply_key(field, item).and_then(Node::scalar_text) == Some(value)),
        _ => None,
    }
}

fn apply_component<'a>(component: &Component, node: &'a Node) -> Option<&'a Node> {
    match component {
        Component::Key(name) => apply_key(name, node),
        Component::Selector { field, value } => apply_selector(field, value, node),
    }
}

/// Walk all components from `root`, accumulating the locating trail.
pub(crate) fn apply_components<'a>(
    components: &[Component],
    root: &'a Node,
) -> Option<(Element, &'a Node)> {
    let mut element = Element::root(root.id());
    let mut current = root;
    for component in components {
        let next = apply_component(component, current)?;
        element = element.descend(next.id());
        current = next;
    }
    Some((element, current))
}

/// Parse and resolve a path string. `Err` only for syntax errors; an absent
/// path is `Ok(None)`.
pub(crate) fn search<'a>(path: &str, root: &'a Node) -> Result<Option<(Element, &'a Node)>> {
    let parsed = Path::parse(path)?;
    Ok(apply_components(parsed.components(), root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        Node::document(Node::mapping(vec![
            (Node::str("usersCount"), Node::int(2)),
            (
                Node::str("users"),
                Node::sequence(vec![
                    Node::mapping(vec![
                        (Node::str("name"), Node::str("josie")),
                        (
                            Node::str("roles"),
                            Node::sequence(vec![
                                Node::str("bot"),
                                Node::str("foo"),
                                Node::str("bar"),
                            ]),
                        ),
                    ]),
                    Node::mapping(vec![
                        (Node::str("name"), Node::str("lester")),
                        (Node::str("roles"), Node::sequence(vec![Node::str("dummy")])),
                    ]),
                ]),
            ),
        ]))
    }

    #[test]
    fn key_on_document_reaches_top_level_values() {
        let tree = sample_tree();
        let found = apply_key("usersCount", &tree).unwrap();
        assert_eq!(found.as_i64(), Some(2));
    }

    #[test]
    fn selector_picks_matching_sequence_element() {
        let tree = sample_tree();
        let (el, node) = search("users.(name='josie').roles", &tree).unwrap().unwrap();
        assert_eq!(node.as_str_slice(), Some(vec!["bot", "foo", "bar"]));
        assert_eq!(el.depth(), 3);
    }

    #[test]
    fn miss_short_circuits_to_none() {
        let tree = sample_tree();
        assert!(search("users.(name='nobody').roles", &tree)
            .unwrap()
            .is_none());
        assert!(search("missing", &tree).unwrap().is_none());
        // Key applied to a sequence is a miss, not an error
        assert!(search("users.name", &tree).unwrap().is_none());
    }

    #[test]
    fn syntax_errors_propagate() {
        let tree = sample_tree();
        assert!(search("users(name='x')", &tree).is_err());
    }

    #[test]
    fn resolve_is_idempotent() {
        let tree = sample_tree();
        let a = search("users.(name='lester')", &tree).unwrap().unwrap();
        let b = search("users.(name='lester')", &tree).unwrap().unwrap();
        assert_eq!(a.0, b.0);
        assert_eq!(a.1.id(), b.1.id());
    }

    #[test]
    fn trail_parent_of_top_level_value_is_the_document() {
        let tree = sample_tree();
        let (el, _) = search("usersCount", &tree).unwrap().unwrap();
        assert_eq!(el.parent(), Some(tree.id()));
    }

    #[test]
    fn selector_matches_on_literal_text() {
        let tree = Node::document(Node::mapping(vec![(
            Node::str("items"),
            Node::sequence(vec![Node::mapping(vec![(Node::str("id"), Node::int(7))])]),
        )]));
        // Scalar equality is by exact string form, whatever the tag
        let (_, node) = search("items.(id='7')", &tree).unwrap().unwrap();
        assert_eq!(node.kind(), crate::core::node::Kind::Mapping);
    }
}
