use std::fmt;

use serde::{Deserialize, Serialize};

/// A field-access path from the document root to a leaf, e.g. `Address.City`.
///
/// Segments carry the source-side field names; wire names are resolved later
/// against a document schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse a dotted path. Empty segments are discarded, so `""` parses to
    /// an empty path.
    pub fn parse(path: &str) -> Self {
        Self(
            path.split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let path = FieldPath::parse("Address.City");
        assert_eq!(path.segments(), ["Address", "City"]);
        assert_eq!(path.to_string(), "Address.City");
    }

    #[test]
    fn empty_and_degenerate_paths() {
        assert!(FieldPath::parse("").is_empty());
        assert!(FieldPath::parse(".").is_empty());
        assert_eq!(FieldPath::parse(".City").segments(), ["City"]);
    }
}
