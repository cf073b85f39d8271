//! jsonpatcher: an idempotent JSON Patch engine.
//!
//! Applies `add`, `remove`, `replace` and `test` operations, addressed by
//! JSON Pointer, to a JSON document and reports whether the document changed
//! and whether the tests held.
//!
//! - [`json_patch`]: document parsing, descriptor validation, operation
//!   execution and batch application
//! - [`json_cli`]: the file-patching front end behind the `json-patch` binary

pub mod json_patch;
pub mod json_cli;

pub use json_patch::{Document, JsonPatcher, Op, OpKind, Outcome, PatchError};
