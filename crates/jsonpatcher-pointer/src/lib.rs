//! JSON Pointer (RFC 6901) utilities for jsonpatcher.
//!
//! Parses pointer strings into paths, formats them back, looks values up, and
//! resolves the parent container of a pointer so a patch operation can mutate
//! it in place.
//!
//! # Example
//!
//! ```
//! use jsonpatcher_pointer::{parse_json_pointer, format_json_pointer, find};
//!
//! // Parse a JSON pointer string into path components
//! let path = parse_json_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! // Format path components back to a JSON pointer string
//! let pointer = format_json_pointer(&path);
//! assert_eq!(pointer, "/foo/bar");
//!
//! // Look a value up in a JSON document
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! let val = find(&doc, &path);
//! assert_eq!(val, Ok(Some(&serde_json::json!(42))));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Container, Location, Path, PathStep, Resolved};

pub mod resolve;
pub use resolve::{find, resolve_mut};

/// The final path step that addresses the slot after the last array element.
pub const APPEND_MARKER: &str = "-";

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, so "~01" decodes to "~1" rather than "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into path components.
///
/// - Empty string returns the root (empty) path
/// - The leading `/` is stripped
/// - Each component is unescaped
///
/// A pointer without the leading `/` is read as if it had one; callers that
/// must reject such input check the prefix first.
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/"), vec![""]);
/// assert_eq!(parse_json_pointer("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let rest = pointer.strip_prefix('/').unwrap_or(pointer);
    rest.split('/').map(unescape_component).collect()
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["foo".to_string(), "bar".to_string()]), "/foo/bar");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("1.5"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    // No leading zeros unless the index is exactly "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Parse an array index step, rejecting anything [`is_valid_index`] rejects.
pub fn parse_index(step: &str) -> Option<usize> {
    if !is_valid_index(step) {
        return None;
    }
    step.parse().ok()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("path segment '{pointer}' does not exist")]
    MissingKey { pointer: String },
    #[error("'{token}' at '{pointer}' is not a valid array index")]
    InvalidIndex { pointer: String, token: String },
    #[error("array index {index} at '{pointer}' is out of bounds (length {len})")]
    IndexOutOfBounds { pointer: String, index: usize, len: usize },
    #[error("value at '{pointer}' is not an object or array")]
    NotAContainer { pointer: String },
}
