//! Walking a path through a document.

use serde_json::Value;
use tracing::trace;

use crate::types::{Container, Location, Resolved};
use crate::{format_json_pointer, parse_index, PointerError};

/// Look up the value at `path` without mutating the document.
///
/// A missing final member or element is `Ok(None)`. Every step before the
/// last must exist, and fails with the same [`PointerError`] that
/// [`resolve_mut`] reports for it.
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::{find, parse_json_pointer, PointerError};
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}});
/// assert_eq!(find(&doc, &parse_json_pointer("/foo/bar")), Ok(Some(&json!(42))));
/// assert_eq!(find(&doc, &parse_json_pointer("/foo/baz")), Ok(None));
/// assert_eq!(
///     find(&doc, &parse_json_pointer("/nope/baz")),
///     Err(PointerError::MissingKey { pointer: "/nope".into() })
/// );
/// ```
pub fn find<'a>(doc: &'a Value, path: &[String]) -> Result<Option<&'a Value>, PointerError> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(Some(doc));
    };

    let mut current = doc;
    for (depth, step) in parents.iter().enumerate() {
        let prefix = || format_json_pointer(&path[..=depth]);
        current = match current {
            Value::Object(map) => map
                .get(step)
                .ok_or_else(|| PointerError::MissingKey { pointer: prefix() })?,
            Value::Array(arr) => {
                let idx = parse_index(step).ok_or_else(|| PointerError::InvalidIndex {
                    pointer: prefix(),
                    token: step.clone(),
                })?;
                arr.get(idx).ok_or_else(|| PointerError::IndexOutOfBounds {
                    pointer: prefix(),
                    index: idx,
                    len: arr.len(),
                })?
            }
            _ => {
                return Err(PointerError::NotAContainer {
                    pointer: format_json_pointer(&path[..depth]),
                })
            }
        };
    }

    match current {
        Value::Object(map) => Ok(map.get(last)),
        Value::Array(arr) => Ok(parse_index(last).and_then(|idx| arr.get(idx))),
        _ => Err(PointerError::NotAContainer {
            pointer: format_json_pointer(parents),
        }),
    }
}

/// Resolve the parent container of `path` for mutation.
///
/// Every step but the last is walked; the last one is handed back unresolved
/// together with a flag saying whether it currently exists. The empty path
/// resolves to [`Resolved::Root`].
///
/// # Errors
///
/// - [`PointerError::MissingKey`] if an intermediate object member is absent
/// - [`PointerError::InvalidIndex`] if an intermediate array step is not a
///   decimal index (this includes the `-` marker)
/// - [`PointerError::IndexOutOfBounds`] if an intermediate index is past the end
/// - [`PointerError::NotAContainer`] if a step would descend into a scalar
///
/// # Example
///
/// ```
/// use jsonpatcher_pointer::{parse_json_pointer, resolve_mut, Resolved};
/// use serde_json::json;
///
/// let mut doc = json!({"foo": {"bar": 42}});
/// let path = parse_json_pointer("/foo/baz");
/// match resolve_mut(&mut doc, &path).unwrap() {
///     Resolved::Child(loc) => {
///         assert_eq!(loc.key, "baz");
///         assert!(!loc.exists);
///     }
///     Resolved::Root(_) => unreachable!(),
/// }
/// ```
pub fn resolve_mut<'a>(doc: &'a mut Value, path: &[String]) -> Result<Resolved<'a>, PointerError> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(Resolved::Root(doc));
    };

    let mut current = doc;
    for (depth, step) in parents.iter().enumerate() {
        let prefix = || format_json_pointer(&path[..=depth]);
        current = match current {
            Value::Object(map) => map
                .get_mut(step)
                .ok_or_else(|| PointerError::MissingKey { pointer: prefix() })?,
            Value::Array(arr) => {
                let idx = parse_index(step).ok_or_else(|| PointerError::InvalidIndex {
                    pointer: prefix(),
                    token: step.clone(),
                })?;
                let len = arr.len();
                arr.get_mut(idx).ok_or_else(|| PointerError::IndexOutOfBounds {
                    pointer: prefix(),
                    index: idx,
                    len,
                })?
            }
            _ => {
                return Err(PointerError::NotAContainer {
                    pointer: format_json_pointer(&path[..depth]),
                })
            }
        };
    }

    let (container, exists) = match current {
        Value::Object(map) => {
            let exists = map.contains_key(last);
            (Container::Object(map), exists)
        }
        Value::Array(arr) => {
            let exists = parse_index(last).is_some_and(|idx| idx < arr.len());
            (Container::Array(arr), exists)
        }
        _ => {
            return Err(PointerError::NotAContainer {
                pointer: format_json_pointer(parents),
            })
        }
    };
    trace!(pointer = %format_json_pointer(path), exists, "resolved parent container");

    Ok(Resolved::Child(Location {
        container,
        key: last.clone(),
        exists,
    }))
}
