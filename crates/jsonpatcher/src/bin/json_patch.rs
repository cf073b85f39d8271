//! `json-patch`: apply add/remove/replace/test operations to a JSON document.
//!
//! Usage:
//!   json-patch --operations '<json>' < doc.json
//!   json-patch --src doc.json --operations-file ops.json [--pretty] [--backup] [--check]
//!
//! Without `--src` the document is read from stdin and the patched document
//! is written to stdout. With `--src` the file is patched and a JSON report
//! (`changed`, `tested`, `dest`) is written to stdout. A failed `test`
//! exits with status 1 in both modes.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use jsonpatcher::json_cli::{
    self, parse_operations, read_file, CliError, PatchFileOptions, STDIN_LABEL,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "json-patch", version, about = "Apply JSON Patch operations to a document")]
struct Args {
    /// File to patch; the document is read from stdin when omitted.
    #[arg(long, env = "JSON_PATCH_SRC")]
    src: Option<PathBuf>,

    /// Where to write the patched file (defaults to --src).
    #[arg(long, env = "JSON_PATCH_DEST", requires = "src")]
    dest: Option<PathBuf>,

    /// Operations as a JSON array (or a single operation object).
    #[arg(long, env = "JSON_PATCH_OPERATIONS", conflicts_with = "operations_file")]
    operations: Option<String>,

    /// File holding the operations.
    #[arg(long, env = "JSON_PATCH_OPERATIONS_FILE")]
    operations_file: Option<PathBuf>,

    /// Pretty-print the output document.
    #[arg(long, env = "JSON_PATCH_PRETTY")]
    pretty: bool,

    /// Keep a timestamped copy of the destination before overwriting it.
    #[arg(long, env = "JSON_PATCH_BACKUP")]
    backup: bool,

    /// Report what would change without writing.
    #[arg(long, env = "JSON_PATCH_CHECK")]
    check: bool,

    /// Start from `{}` when --src does not exist.
    #[arg(long, env = "JSON_PATCH_CREATE")]
    create: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let ops_text = match (args.operations, &args.operations_file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_file(path)?,
        (None, None) => {
            return Err(CliError::Usage(
                "one of --operations or --operations-file is required".to_string(),
            ))
        }
    };
    let operations = parse_operations(&ops_text)?;

    match args.src {
        Some(src) => {
            let options = PatchFileOptions {
                src,
                dest: args.dest,
                operations,
                pretty: args.pretty,
                backup: args.backup,
                check: args.check,
                create: args.create,
            };
            let report = json_cli::run(&options)?;
            println!("{}", serde_json::to_string(&report)?);
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::Io { path: PathBuf::from(STDIN_LABEL), source: e })?;
            let out = json_cli::patch_stream(buf.trim(), &operations, args.pretty)?;
            println!("{out}");
        }
    }
    Ok(())
}
