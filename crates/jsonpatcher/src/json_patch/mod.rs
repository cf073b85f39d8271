//! JSON Patch engine.
//!
//! # Operations
//!
//! The `add`, `remove`, `replace` and `test` operations of RFC 6902, with
//! two differences that make repeated runs safe:
//!
//! - `add` and `replace` of a value deep-equal to the current one leave the
//!   document untouched and report `modified = false`.
//! - a failing `test` does not abort the batch; it is reported through
//!   the `tested` half of the [`Outcome`].
//!
//! [`JsonPatcher`] is the entry point: it validates descriptors, parses the
//! document once, and applies the operations in order.

pub mod types;
pub mod equal;
pub mod document;
pub mod apply;
pub mod codec;
pub mod patcher;

pub use types::{ErrorKind, Op, OpKind, Outcome, PatchError};
pub use equal::deep_equal;
pub use document::Document;
pub use apply::apply_op;
pub use codec::json::{from_json, from_json_ops, from_json_patch, to_json, to_json_patch};
pub use patcher::JsonPatcher;
