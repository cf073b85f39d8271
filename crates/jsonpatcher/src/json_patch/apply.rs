//! Applying a single operation to a document in place.

use jsonpatcher_pointer::{find, format_json_pointer, resolve_mut, Container, Location, Resolved};
use serde_json::Value;
use tracing::trace;

use super::equal::deep_equal;
use super::types::{Op, Outcome, PatchError};

// ── Individual operation applicators ─────────────────────────────────────

/// Overwrite `target` unless it already holds an equal value.
fn overwrite(target: &mut Value, value: &Value) -> bool {
    if deep_equal(target, value) {
        return false;
    }
    *target = value.clone();
    true
}

fn not_found(path: &[String]) -> PatchError {
    PatchError::NotFound(format_json_pointer(path))
}

fn apply_add(doc: &mut Value, path: &[String], value: &Value) -> Result<bool, PatchError> {
    let loc = match resolve_mut(doc, path)? {
        Resolved::Root(root) => return Ok(overwrite(root, value)),
        Resolved::Child(loc) => loc,
    };
    let idx = loc.index();
    let append = loc.is_append_marker();
    let Location { container, key, .. } = loc;
    match container {
        Container::Object(map) => {
            if let Some(current) = map.get_mut(&key) {
                return Ok(overwrite(current, value));
            }
            map.insert(key, value.clone());
            Ok(true)
        }
        Container::Array(arr) => {
            let len = arr.len();
            let idx = if append { Some(len) } else { idx.filter(|idx| *idx <= len) };
            let idx = idx.ok_or_else(|| PatchError::InvalidIndex {
                pointer: format_json_pointer(&path[..path.len() - 1]),
                token: key,
                len,
            })?;
            arr.insert(idx, value.clone());
            Ok(true)
        }
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<bool, PatchError> {
    let loc = match resolve_mut(doc, path)? {
        Resolved::Root(_) => {
            return Err(PatchError::InvalidTarget(
                "the document root cannot be removed".to_string(),
            ))
        }
        Resolved::Child(loc) => loc,
    };
    if !loc.exists {
        return Err(not_found(path));
    }
    let idx = loc.index();
    match loc.container {
        Container::Object(map) => {
            map.shift_remove(&loc.key);
        }
        Container::Array(arr) => {
            arr.remove(idx.ok_or_else(|| not_found(path))?);
        }
    }
    Ok(true)
}

fn apply_replace(doc: &mut Value, path: &[String], value: &Value) -> Result<bool, PatchError> {
    let loc = match resolve_mut(doc, path)? {
        Resolved::Root(root) => return Ok(overwrite(root, value)),
        Resolved::Child(loc) => loc,
    };
    let idx = loc.index();
    let target = match loc.container {
        Container::Object(map) => map.get_mut(&loc.key),
        Container::Array(arr) => match idx {
            Some(idx) => arr.get_mut(idx),
            None => None,
        },
    };
    let target = target.ok_or_else(|| not_found(path))?;
    Ok(overwrite(target, value))
}

fn apply_test(doc: &Value, path: &[String], value: &Value) -> Result<bool, PatchError> {
    let current = find(doc, path)?.ok_or_else(|| not_found(path))?;
    Ok(deep_equal(current, value))
}

// ── Main apply function ───────────────────────────────────────────────────

/// Apply a single operation to the document (in-place mutation).
///
/// Mutating operations report whether the document changed; `add` and
/// `replace` with a value equal to the current one leave the document
/// untouched and report `modified = false`. `test` reports whether the value
/// at the path equals the expected one and never mutates.
///
/// # Errors
///
/// - [`PatchError::Path`] if an intermediate path step cannot be walked
/// - [`PatchError::NotFound`] if `remove`/`replace`/`test` target is absent
/// - [`PatchError::InvalidIndex`] if `add` uses an index past the array end
/// - [`PatchError::InvalidTarget`] for `remove` on the document root
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<Outcome, PatchError> {
    let outcome = match op {
        Op::Add { path, value } => Outcome::modified(apply_add(doc, path, value)?),
        Op::Remove { path } => Outcome::modified(apply_remove(doc, path)?),
        Op::Replace { path, value } => Outcome::modified(apply_replace(doc, path, value)?),
        Op::Test { path, value } => Outcome::tested(apply_test(doc, path, value)?),
    };
    trace!(op = op.op_name(), ?outcome, "operation applied");
    Ok(outcome)
}

// ── Tests ─────────────────────────────────────────────────────────────────
