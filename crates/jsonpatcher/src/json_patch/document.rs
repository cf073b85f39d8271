//! The in-memory document a patch session works on.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::types::PatchError;

/// A parsed JSON document.
///
/// Object members keep their insertion order so a patched document
/// serializes with the same layout it was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse JSON text. Any JSON value is accepted at the root.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::Parse`] if `text` is not valid JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonpatcher::json_patch::Document;
    ///
    /// let doc = Document::parse(r#"{"b": 1, "a": [true, null]}"#).unwrap();
    /// assert_eq!(doc.to_json_string(), r#"{"b":1,"a":[true,null]}"#);
    ///
    /// let err = Document::parse("not valid json").unwrap_err();
    /// assert!(err.to_string().contains("invalid JSON"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, PatchError> {
        let parse_error = |e: serde_json::Error| PatchError::Parse(e.to_string());
        let mut de = serde_json::Deserializer::from_str(text);
        // Nesting depth is bounded only by memory; serde_stacker grows the
        // stack on demand instead.
        de.disable_recursion_limit();
        let root = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
            .map_err(parse_error)?;
        de.end().map_err(parse_error)?;
        Ok(Self::from_value(root))
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Compact serialization.
    pub fn to_json_string(&self) -> String {
        self.root.to_string()
    }

    /// Pretty serialization with two-space indentation.
    pub fn to_json_string_pretty(&self) -> String {
        format!("{:#}", self.root)
    }
}

impl FromStr for Document {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::from_value(root)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
