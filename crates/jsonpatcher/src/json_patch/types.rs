//! Core types for the JSON Patch engine.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use jsonpatcher_pointer::{Path, PointerError};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A malformed operation descriptor. Raised before anything is applied.
    #[error("{0}")]
    Validation(String),
    /// The input text could not be parsed.
    #[error("input is invalid JSON: {0}")]
    Parse(String),
    /// An intermediate path step is missing or has the wrong type.
    #[error(transparent)]
    Path(#[from] PointerError),
    /// The target of `remove`, `replace` or `test` does not exist.
    #[error("path '{0}' does not exist")]
    NotFound(String),
    /// An `add` into an array used an index outside `0..=len`.
    #[error("'{token}' is not a valid insertion index into the array at '{pointer}' (length {len})")]
    InvalidIndex { pointer: String, token: String, len: usize },
    /// The operation cannot target this location at all.
    #[error("{0}")]
    InvalidTarget(String),
}

/// The three error families a patch session can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Parse,
    Runtime,
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::Validation(_) => ErrorKind::Validation,
            PatchError::Parse(_) => ErrorKind::Parse,
            PatchError::Path(_)
            | PatchError::NotFound(_)
            | PatchError::InvalidIndex { .. }
            | PatchError::InvalidTarget(_) => ErrorKind::Runtime,
        }
    }
}

// ── Operation kinds ───────────────────────────────────────────────────────

/// The operation names accepted in the `op` member of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Remove,
    Replace,
    Test,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Remove => "remove",
            OpKind::Replace => "replace",
            OpKind::Test => "test",
        }
    }

    /// Whether a descriptor of this kind must carry a `value` member.
    pub fn requires_value(&self) -> bool {
        matches!(self, OpKind::Add | OpKind::Test)
    }
}

impl FromStr for OpKind {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(OpKind::Add),
            "remove" => Ok(OpKind::Remove),
            "replace" => Ok(OpKind::Replace),
            "test" => Ok(OpKind::Test),
            other => Err(PatchError::Validation(format!(
                "'{other}' is not a valid patch operation"
            ))),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A validated JSON Patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Test { path: Path, value: Value },
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Op::Add { .. } => OpKind::Add,
            Op::Remove { .. } => OpKind::Remove,
            Op::Replace { .. } => OpKind::Replace,
            Op::Test { .. } => OpKind::Test,
        }
    }

    /// Returns the operation name string as it appears in descriptors.
    pub fn op_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns the path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// Returns the operation's value, if it carries one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            Op::Remove { .. } => None,
        }
    }

    /// Returns true if this operation only inspects the document.
    pub fn is_predicate(&self) -> bool {
        matches!(self, Op::Test { .. })
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────

/// What an operation, or a whole batch, did to the document.
///
/// `modified` is only set by `add`/`remove`/`replace`; `tested` only by
/// `test`. A field stays `None` when no operation of its family ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub modified: Option<bool>,
    pub tested: Option<bool>,
}

impl Outcome {
    /// Outcome of a mutating operation.
    pub fn modified(modified: bool) -> Self {
        Self { modified: Some(modified), tested: None }
    }

    /// Outcome of a `test` operation.
    pub fn tested(tested: bool) -> Self {
        Self { modified: None, tested: Some(tested) }
    }

    /// Fold another outcome into this one.
    ///
    /// `modified` is true if any mutation changed something; `tested` is
    /// true only if every test passed.
    pub fn merge(self, other: Outcome) -> Outcome {
        Outcome {
            modified: combine(self.modified, other.modified, |a, b| a || b),
            tested: combine(self.tested, other.tested, |a, b| a && b),
        }
    }

    /// The `(modified, tested)` pair.
    pub fn as_pair(&self) -> (Option<bool>, Option<bool>) {
        (self.modified, self.tested)
    }
}

fn combine(a: Option<bool>, b: Option<bool>, f: impl Fn(bool, bool) -> bool) -> Option<bool> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}
