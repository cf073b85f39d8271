//! Type definitions for JSON Pointer resolution.

use serde_json::{Map, Value};

use crate::{parse_index, APPEND_MARKER};

/// A step in a JSON Pointer path.
///
/// Either an object key or a decimal array index; the distinction is only
/// made once the step meets a concrete container.
pub type PathStep = String;

/// A JSON Pointer path. The empty path addresses the document root.
pub type Path = Vec<PathStep>;

/// Mutable handle to the container that owns the addressed value.
#[derive(Debug)]
pub enum Container<'a> {
    Object(&'a mut Map<String, Value>),
    Array(&'a mut Vec<Value>),
}

/// The parent container of a non-root pointer plus its unresolved final token.
#[derive(Debug)]
pub struct Location<'a> {
    /// The object or array that holds (or would hold) the target.
    pub container: Container<'a>,
    /// The final, already unescaped, path step.
    pub key: PathStep,
    /// Whether `key` currently addresses an existing member or element.
    pub exists: bool,
}

impl Location<'_> {
    /// Check if the final token is the `-` append marker.
    pub fn is_append_marker(&self) -> bool {
        self.key == APPEND_MARKER
    }

    /// The numeric index of the final token, if it is a well-formed index.
    pub fn index(&self) -> Option<usize> {
        parse_index(&self.key)
    }
}

/// Result of walking a pointer through a mutable document.
#[derive(Debug)]
pub enum Resolved<'a> {
    /// The empty pointer: the whole document, which has no parent.
    Root(&'a mut Value),
    /// Any other pointer.
    Child(Location<'a>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_in_array() {
        let mut arr = vec![json!(1), json!(2), json!(3)];
        let loc = Location {
            container: Container::Array(&mut arr),
            key: "1".to_string(),
            exists: true,
        };
        assert!(!loc.is_append_marker());
        assert_eq!(loc.index(), Some(1));
    }

    #[test]
    fn test_location_rejects_malformed_indexes() {
        let mut map = Map::new();
        for key in ["foo", "01", "-1", "1.5", ""] {
            let loc = Location {
                container: Container::Object(&mut map),
                key: key.to_string(),
                exists: false,
            };
            assert_eq!(loc.index(), None, "key {key:?}");
        }
    }

    #[test]
    fn test_location_append_marker() {
        let mut arr = vec![json!(1)];
        let loc = Location {
            container: Container::Array(&mut arr),
            key: "-".to_string(),
            exists: false,
        };
        assert!(loc.is_append_marker());
        assert_eq!(loc.index(), None);
    }
}
