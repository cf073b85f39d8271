//! File-patching front end used by the `json-patch` binary.
//!
//! Two modes:
//! - stream: patch a document given as text and hand back the result
//! - file: patch a file in place (or into `dest`), optionally keeping a
//!   backup, and report whether anything changed

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::json_patch::{Document, JsonPatcher, Outcome, PatchError};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("operations are not valid JSON: {0}")]
    Operations(#[source] serde_json::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("a patch test failed against {}", .path.display())]
    TestFailed { path: PathBuf },
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    fn io(path: &Path, source: io::Error) -> Self {
        CliError::Io { path: path.to_path_buf(), source }
    }
}

/// Read a whole file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

/// Parse operation descriptors: a JSON array, or a single descriptor object.
pub fn parse_operations(text: &str) -> Result<Vec<Value>, CliError> {
    match serde_json::from_str(text).map_err(CliError::Operations)? {
        Value::Array(ops) => Ok(ops),
        single @ Value::Object(_) => Ok(vec![single]),
        other => Err(CliError::Usage(format!(
            "operations must be a JSON array or object, got {other}"
        ))),
    }
}

fn render(doc: &Document, pretty: bool) -> String {
    if pretty {
        doc.to_json_string_pretty()
    } else {
        doc.to_json_string()
    }
}

// ── stream mode ───────────────────────────────────────────────────────────

/// Apply operations to a document given as text.
///
/// Returns the patched document, serialized, together with the outcome.
pub fn apply_json_patch(
    doc_json: &str,
    operations: &[Value],
    pretty: bool,
) -> Result<(String, Outcome), CliError> {
    let mut patcher = JsonPatcher::new(doc_json, operations)?;
    let outcome = patcher.patch()?;
    Ok((render(patcher.document(), pretty), outcome))
}

/// Label used for the document in stream mode errors.
pub const STDIN_LABEL: &str = "<stdin>";

/// Stream mode as the binary runs it: like [`apply_json_patch`], but a
/// failed `test` is an error, matching file mode.
///
/// # Errors
///
/// [`CliError::TestFailed`] when any `test` operation reported a mismatch,
/// otherwise as [`apply_json_patch`].
pub fn patch_stream(doc_json: &str, operations: &[Value], pretty: bool) -> Result<String, CliError> {
    let (out, outcome) = apply_json_patch(doc_json, operations, pretty)?;
    if outcome.tested == Some(false) {
        warn!("patch test failed against {STDIN_LABEL}");
        return Err(CliError::TestFailed { path: PathBuf::from(STDIN_LABEL) });
    }
    Ok(out)
}

// ── file mode ─────────────────────────────────────────────────────────────

/// Options for patching a file.
#[derive(Debug, Clone, Default)]
pub struct PatchFileOptions {
    /// The file to read.
    pub src: PathBuf,
    /// Where to write the result. Defaults to `src`.
    pub dest: Option<PathBuf>,
    /// Operation descriptors, applied in order.
    pub operations: Vec<Value>,
    /// Pretty-print the written document.
    pub pretty: bool,
    /// Copy the existing `dest` aside before overwriting it.
    pub backup: bool,
    /// Compute the outcome without writing anything.
    pub check: bool,
    /// Treat a missing `src` as an empty object.
    pub create: bool,
}

/// What a file patch did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub changed: bool,
    pub tested: Option<bool>,
    pub dest: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_file: Option<PathBuf>,
}

/// Patch a file according to `options`.
///
/// The destination is written only when some operation modified the
/// document, no `test` failed, and `check` is off.
///
/// # Errors
///
/// - [`CliError::Io`] when `src` cannot be read or `dest` cannot be written
/// - [`CliError::Patch`] for invalid operations, invalid JSON, or a failed operation
/// - [`CliError::TestFailed`] when any `test` operation reported a mismatch
pub fn run(options: &PatchFileOptions) -> Result<PatchReport, CliError> {
    let dest = options.dest.clone().unwrap_or_else(|| options.src.clone());

    let text = match fs::read_to_string(&options.src) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound && options.create => {
            debug!(src = %options.src.display(), "source missing, starting from an empty object");
            "{}".to_string()
        }
        Err(e) => return Err(CliError::io(&options.src, e)),
    };

    let mut patcher = JsonPatcher::new(&text, &options.operations)?;
    let outcome = patcher.patch()?;

    if outcome.tested == Some(false) {
        warn!(src = %options.src.display(), "patch test failed, leaving file untouched");
        return Err(CliError::TestFailed { path: options.src.clone() });
    }

    let changed = outcome.modified == Some(true);
    let mut backup_file = None;
    if changed && !options.check {
        if options.backup && dest.exists() {
            let backup = backup_path(&dest);
            fs::copy(&dest, &backup).map_err(|e| CliError::io(&backup, e))?;
            backup_file = Some(backup);
        }
        let mut out = render(patcher.document(), options.pretty);
        out.push('\n');
        write_atomic(&dest, out.as_bytes())?;
        info!(dest = %dest.display(), "wrote patched document");
    }

    Ok(PatchReport { changed, tested: outcome.tested, dest, backup_file })
}

/// Replace `dest` with `contents` through a temporary file in the same
/// directory, so readers see either the old or the new document.
fn write_atomic(dest: &Path, contents: &[u8]) -> Result<(), CliError> {
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CliError::io(dest, e))?;
    tmp.write_all(contents).map_err(|e| CliError::io(dest, e))?;
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| CliError::io(dest, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| CliError::io(dest, e))?;
    tmp.persist(dest).map_err(|e| CliError::io(dest, e.error))?;
    Ok(())
}

fn backup_path(dest: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut name = dest.as_os_str().to_os_string();
    name.push(format!(".{secs}.bak"));
    PathBuf::from(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────
