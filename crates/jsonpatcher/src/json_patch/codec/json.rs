//! JSON codec for patch operation descriptors.
//!
//! Decoding is where descriptors are validated: every problem is reported as
//! [`PatchError::Validation`] before any operation touches a document.

use jsonpatcher_pointer::{format_json_pointer, parse_json_pointer};
use serde_json::{Map, Value};

use crate::json_patch::types::{Op, OpKind, PatchError};

fn invalid(msg: impl Into<String>) -> PatchError {
    PatchError::Validation(msg.into())
}

// ── Path helpers ──────────────────────────────────────────────────────────

fn decode_path(map: &Map<String, Value>) -> Result<Vec<String>, PatchError> {
    let raw = map
        .get("path")
        .ok_or_else(|| invalid("patch operation is missing a 'path' member"))?;
    let pointer = raw
        .as_str()
        .ok_or_else(|| invalid(format!("'path' member {raw} must be a string")))?;
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(invalid(format!(
            "'{pointer}' is not a valid JSON Pointer: it must be empty or start with '/'"
        )));
    }
    Ok(parse_json_pointer(pointer))
}

fn decode_kind(map: &Map<String, Value>) -> Result<OpKind, PatchError> {
    let raw = map
        .get("op")
        .ok_or_else(|| invalid("patch operation is missing an 'op' member"))?;
    match raw.as_str() {
        Some(name) => name.parse(),
        None => Err(invalid(format!("{raw} is not a valid patch operation"))),
    }
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Decode and validate one operation descriptor.
///
/// A descriptor is an object with `op`, `path` and, for `add` and `test`, a
/// `value`. A `replace` without `value` writes `null`; a `value` on `remove`
/// is ignored.
///
/// # Example
///
/// ```
/// use jsonpatcher::json_patch::{from_json, Op};
/// use serde_json::json;
///
/// let op = from_json(&json!({"op": "add", "path": "/foo/three", "value": 3})).unwrap();
/// assert_eq!(op, Op::Add { path: vec!["foo".into(), "three".into()], value: json!(3) });
///
/// let err = from_json(&json!({"path": "/foo"})).unwrap_err();
/// assert!(err.to_string().contains("missing an 'op' member"));
/// ```
pub fn from_json(descriptor: &Value) -> Result<Op, PatchError> {
    let map = descriptor
        .as_object()
        .ok_or_else(|| invalid(format!("patch operation {descriptor} is not an object")))?;

    let kind = decode_kind(map)?;
    let path = decode_path(map)?;
    let value = map.get("value").cloned();

    if kind.requires_value() && value.is_none() {
        return Err(invalid(format!(
            "'{kind}' operation at '{}' does not have a 'value'",
            format_json_pointer(&path)
        )));
    }

    Ok(match kind {
        OpKind::Add => Op::Add { path, value: value.unwrap_or_default() },
        OpKind::Remove => Op::Remove { path },
        OpKind::Replace => Op::Replace { path, value: value.unwrap_or_default() },
        OpKind::Test => Op::Test { path, value: value.unwrap_or_default() },
    })
}

/// Decode and validate a list of descriptors, keeping their order.
///
/// Errors name the zero-based index of the offending descriptor. An empty
/// list is rejected.
pub fn from_json_ops(descriptors: &[Value]) -> Result<Vec<Op>, PatchError> {
    if descriptors.is_empty() {
        return Err(invalid("no patch operations were supplied"));
    }
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            from_json(descriptor).map_err(|e| match e {
                PatchError::Validation(msg) => {
                    invalid(format!("error in operation [index = {index}]: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

/// Decode a JSON array of descriptors.
pub fn from_json_patch(patch: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = patch
        .as_array()
        .ok_or_else(|| invalid("a patch must be an array of operations"))?;
    from_json_ops(arr)
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Encode an `Op` back into its descriptor form.
pub fn to_json(op: &Op) -> Value {
    let mut m = Map::new();
    m.insert("op".into(), Value::String(op.op_name().to_string()));
    m.insert("path".into(), Value::String(format_json_pointer(op.path())));
    if let Some(value) = op.value() {
        m.insert("value".into(), value.clone());
    }
    Value::Object(m)
}

/// Encode a list of operations as a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}
