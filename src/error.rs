//! Error types for the yamldig library
//!
//! All core operations return these as explicit values; the library never
//! panics on malformed input or absent paths.

use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum YamlDigError {
    /// Malformed path string. Carries the original input, the 0-based
    /// character offset of the failure, and a reason; `Display` renders a
    /// caret pointing at the offending character.
    #[error("could not parse path:\n{path}\n{}^ {reason}", " ".repeat(*.offset))]
    Syntax {
        path: String,
        offset: usize,
        reason: String,
    },

    /// A well-formed path has no matching node.
    #[error("no value found at path {path}")]
    NotFound { path: String },

    /// An internal bookkeeping invariant was violated, e.g. a located node
    /// could not be found by identity inside its claimed parent, or a
    /// mutation targeted a node kind that cannot hold it.
    #[error("structural error: {reason}")]
    Structural { reason: String },

    /// The value supplied to set/replace cannot be mapped into a tree node.
    #[error("value conversion error: {reason}")]
    ValueConversion { reason: String },

    /// YAML decoding or encoding errors at the format boundary.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, YamlDigError>;

impl YamlDigError {
    /// Create a new path syntax error
    pub fn syntax(path: impl Into<String>, offset: usize, reason: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.into(),
            offset,
            reason: reason.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new structural error
    pub fn structural(reason: impl Into<String>) -> Self {
        Self::Structural {
            reason: reason.into(),
        }
    }

    /// Create a new value conversion error
    pub fn value_conversion(reason: impl Into<String>) -> Self {
        Self::ValueConversion {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_renders_caret_at_offset() {
        let err = YamlDigError::syntax("projects(project='foo')", 8, "unexpected '('");
        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "could not parse path:\nprojects(project='foo')\n        ^ unexpected '('"
        );
    }

    #[test]
    fn not_found_names_the_path() {
        let err = YamlDigError::not_found("a.b.c");
        assert!(err.to_string().contains("a.b.c"));
    }
}
