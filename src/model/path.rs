//! Dotted field paths used to locate errors in nested config.

use std::fmt;

/// Location of a field inside a group or definition, e.g.
/// `definitions[0].backend[1].timeout`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path to a named child field.
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Path to an array element.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    /// Append a path relative to this one.
    pub fn join(&self, rest: &FieldPath) -> Self {
        if rest.0.is_empty() {
            self.clone()
        } else if self.0.is_empty() || rest.0.starts_with('[') {
            Self(format!("{}{}", self.0, rest.0))
        } else {
            Self(format!("{}.{}", self.0, rest.0))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}
