//! Path grammar and finite-state parser
//!
//! A path selects a node in a document tree using dot-separated components:
//!
//! ```text
//! path       := component ('.' component)*
//! component  := key | selector
//! selector   := '(' field '=' '\'' value '\'' ')'
//! ```
//!
//! A key matches a mapping entry by name; a selector matches the first
//! sequence element whose `field` entry holds a scalar equal to `value`.
//! A backslash suppresses the special meaning of exactly the next character
//! (dot, parens, quote); the backslash itself is not part of the component.

use crate::error::{Result, YamlDigError};

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Select a mapping value by its key
    Key(String),
    /// Select the first sequence element whose `field` equals `value`
    Selector { field: String, value: String },
}

/// A parsed path: an ordered sequence of components, applied left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    components: Vec<Component>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InKey,
    InSelectorKey,
    AfterSelectorOpenQuote,
    InSelectorValue,
    AfterSelectorClose,
    ExpectDotAfterSelector,
}

impl Path {
    /// Parse a path string. Errors carry the input, the character offset of
    /// the failure, and a reason, rendered as a caret diagnostic.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(YamlDigError::syntax(input, 0, "empty path"));
        }

        let mut state = State::InKey;
        let mut components = Vec::new();
        let mut buf = String::new();
        let mut sel_field = String::new();
        let mut sel_value = String::new();
        let mut escaping = false;
        let mut pos = 0;

        for (i, c) in input.chars().enumerate() {
            pos = i;
            match state {
                State::InKey => {
                    if escaping {
                        buf.push(c);
                        escaping = false;
                    } else {
                        match c {
                            '\\' => escaping = true,
                            '.' => components.push(Component::Key(std::mem::take(&mut buf))),
                            '(' => {
                                // Selectors must start a fresh component.
                                if !buf.is_empty() {
                                    return Err(YamlDigError::syntax(
                                        input,
                                        pos,
                                        "unexpected '(' after partial key",
                                    ));
                                }
                                state = State::InSelectorKey;
                            }
                            _ => buf.push(c),
                        }
                    }
                }
                State::InSelectorKey => {
                    if escaping {
                        buf.push(c);
                        escaping = false;
                    } else {
                        match c {
                            '\\' => escaping = true,
                            '=' => {
                                if buf.is_empty() {
                                    return Err(YamlDigError::syntax(
                                        input,
                                        pos,
                                        "unexpected '=' before selector field",
                                    ));
                                }
                                sel_field = std::mem::take(&mut buf);
                                state = State::AfterSelectorOpenQuote;
                            }
                            '(' | ')' | '.' => {
                                return Err(YamlDigError::syntax(
                                    input,
                                    pos,
                                    format!("unexpected '{c}' in selector field"),
                                ));
                            }
                            _ => buf.push(c),
                        }
                    }
                }
                State::AfterSelectorOpenQuote => {
                    if c != '\'' {
                        return Err(YamlDigError::syntax(input, pos, "expected opening quote"));
                    }
                    state = State::InSelectorValue;
                }
                State::InSelectorValue => {
                    if escaping {
                        buf.push(c);
                        escaping = false;
                    } else {
                        match c {
                            '\\' => escaping = true,
                            '\'' => {
                                sel_value = std::mem::take(&mut buf);
                                state = State::AfterSelectorClose;
                            }
                            _ => buf.push(c),
                        }
                    }
                }
                State::AfterSelectorClose => {
                    if c != ')' {
                        return Err(YamlDigError::syntax(input, pos, "expected ')'"));
                    }
                    components.push(Component::Selector {
                        field: std::mem::take(&mut sel_field),
                        value: std::mem::take(&mut sel_value),
                    });
                    state = State::ExpectDotAfterSelector;
                }
                State::ExpectDotAfterSelector => {
                    if c != '.' {
                        return Err(YamlDigError::syntax(
                            input,
                            pos,
                            "expected '.' or end of path",
                        ));
                    }
                    state = State::InKey;
                }
            }
        }

        match state {
            // A selector opened with '(' but never completed with '=' degrades
            // to a plain key fragment, matching legacy leniency.
            State::InKey | State::ExpectDotAfterSelector | State::InSelectorKey => {
                if !buf.is_empty() {
                    components.push(Component::Key(buf));
                }
            }
            _ => {
                return Err(YamlDigError::syntax(input, pos, "unexpected end of path"));
            }
        }

        Ok(Self { components })
    }

    /// The ordered components of this path
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> Component {
        Component::Key(s.to_string())
    }

    fn selector(field: &str, value: &str) -> Component {
        Component::Selector {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn parses_plain_keys() {
        let path = Path::parse("a.b.c").unwrap();
        assert_eq!(path.components(), &[key("a"), key("b"), key("c")]);
    }

    #[test]
    fn parses_single_key() {
        let path = Path::parse("projects").unwrap();
        assert_eq!(path.components(), &[key("projects")]);
    }

    #[test]
    fn parses_selector_between_keys() {
        let path = Path::parse("projects.(project='foo').version").unwrap();
        assert_eq!(
            path.components(),
            &[key("projects"), selector("project", "foo"), key("version")]
        );
    }

    #[test]
    fn parses_trailing_selector() {
        let path = Path::parse("users.(name='josie')").unwrap();
        assert_eq!(path.components(), &[key("users"), selector("name", "josie")]);
    }

    #[test]
    fn escaped_dot_stays_in_one_key() {
        let path = Path::parse("a\\.b.c").unwrap();
        assert_eq!(path.components(), &[key("a.b"), key("c")]);
    }

    #[test]
    fn escaped_backslash_does_not_escape_the_next_char() {
        let path = Path::parse("a\\\\.b").unwrap();
        assert_eq!(path.components(), &[key("a\\"), key("b")]);
    }

    #[test]
    fn escaped_quote_in_selector_value() {
        let path = Path::parse("users.(name='jo\\'sie')").unwrap();
        assert_eq!(
            path.components(),
            &[key("users"), selector("name", "jo'sie")]
        );
    }

    #[test]
    fn escaped_paren_accumulates_into_key() {
        let path = Path::parse("a\\(b").unwrap();
        assert_eq!(path.components(), &[key("a(b")]);
    }

    #[test]
    fn selector_after_partial_key_is_an_error() {
        let err = Path::parse("projects(project='foo')").unwrap_err();
        match err {
            YamlDigError::Syntax { offset, .. } => assert_eq!(offset, 8),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn empty_path_is_an_error() {
        assert!(Path::parse("").is_err());
    }

    #[test]
    fn empty_selector_field_is_an_error() {
        assert!(Path::parse("users.(='x')").is_err());
    }

    #[test]
    fn dot_inside_selector_field_is_an_error() {
        assert!(Path::parse("users.(na.me='x')").is_err());
    }

    #[test]
    fn missing_quote_after_equals_is_an_error() {
        assert!(Path::parse("users.(name=x)").is_err());
    }

    #[test]
    fn missing_close_paren_is_an_error() {
        assert!(Path::parse("users.(name='x'.roles").is_err());
    }

    #[test]
    fn selector_must_be_followed_by_dot() {
        assert!(Path::parse("users.(name='x')roles").is_err());
    }

    #[test]
    fn unterminated_selector_value_is_an_error() {
        assert!(Path::parse("users.(name='x").is_err());
    }

    #[test]
    fn unfinished_selector_field_degrades_to_key() {
        // Legacy leniency: '(' opened but no '=' seen before end of input.
        let path = Path::parse("users.(name").unwrap();
        assert_eq!(path.components(), &[key("users"), key("name")]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let a = Path::parse("a.(b='c').d").unwrap();
        let b = Path::parse("a.(b='c').d").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn trailing_dot_flushes_nothing() {
        let path = Path::parse("a.").unwrap();
        assert_eq!(path.components(), &[key("a")]);
    }
}
