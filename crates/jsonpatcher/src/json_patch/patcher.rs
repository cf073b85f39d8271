//! Batch application of patch operations to one document.

use jsonpatcher_pointer::format_json_pointer;
use serde_json::Value;
use tracing::{debug, warn};

use super::apply::apply_op;
use super::codec::json::from_json_ops;
use super::document::Document;
use super::types::{Op, Outcome, PatchError};

/// A patch session: one document and the operations to apply to it.
///
/// Operations run in order against the same document. A failing operation
/// aborts the batch but leaves the effects of the earlier ones in place;
/// callers that need all-or-nothing semantics should clone the document
/// first.
///
/// # Example
///
/// ```
/// use jsonpatcher::json_patch::JsonPatcher;
/// use serde_json::json;
///
/// let mut patcher = JsonPatcher::new(
///     r#"{"foo": {"one": 1}, "bar": [1, 2, 3], "enabled": true}"#,
///     &[
///         json!({"op": "add", "path": "/foo/three", "value": 3}),
///         json!({"op": "replace", "path": "/enabled", "value": false}),
///         json!({"op": "remove", "path": "/bar/0"}),
///     ],
/// )
/// .unwrap();
///
/// let outcome = patcher.patch().unwrap();
/// assert_eq!(outcome.as_pair(), (Some(true), None));
/// assert_eq!(
///     patcher.document().value(),
///     &json!({"foo": {"one": 1, "three": 3}, "bar": [2, 3], "enabled": false})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsonPatcher {
    doc: Document,
    ops: Vec<Op>,
}

impl JsonPatcher {
    /// Validate `operations` and parse `text`.
    ///
    /// Every descriptor is checked before the document is parsed, so a bad
    /// descriptor is reported even when the text is also malformed.
    ///
    /// # Errors
    ///
    /// - [`PatchError::Validation`] if any descriptor is malformed or the list is empty
    /// - [`PatchError::Parse`] if `text` is not valid JSON
    pub fn new(text: &str, operations: &[Value]) -> Result<Self, PatchError> {
        let ops = from_json_ops(operations)?;
        let doc = Document::parse(text)?;
        Ok(Self { doc, ops })
    }

    /// Build a session from an already parsed document and decoded operations.
    pub fn from_value(value: Value, ops: Vec<Op>) -> Self {
        Self { doc: Document::from_value(value), ops }
    }

    /// Apply every operation in order and aggregate their outcomes.
    ///
    /// See [`Outcome::merge`] for how per-operation results combine.
    ///
    /// # Errors
    ///
    /// The first runtime error aborts the batch and is returned as is.
    pub fn patch(&mut self) -> Result<Outcome, PatchError> {
        let mut outcome = Outcome::default();
        for (index, op) in self.ops.iter().enumerate() {
            let pointer = format_json_pointer(op.path());
            match apply_op(self.doc.value_mut(), op) {
                Ok(result) => {
                    debug!(
                        index,
                        op = op.op_name(),
                        %pointer,
                        modified = ?result.modified,
                        tested = ?result.tested,
                        "applied patch operation"
                    );
                    outcome = outcome.merge(result);
                }
                Err(err) => {
                    warn!(index, op = op.op_name(), %pointer, error = %err, "patch operation failed");
                    return Err(err);
                }
            }
        }
        Ok(outcome)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn operations(&self) -> &[Op] {
        &self.ops
    }
}
