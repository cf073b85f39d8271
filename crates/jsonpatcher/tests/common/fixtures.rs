use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct CaseFile {
    #[serde(default)]
    pub case: Vec<PatchCase>,
}

/// One document, one batch of descriptors, and what the batch should do.
///
/// JSON payloads are kept as strings so the fixture file can hold invalid
/// documents as well as valid ones.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchCase {
    pub name: String,
    pub document: String,
    pub operations: String,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub modified: Option<bool>,
    #[serde(default)]
    pub tested: Option<bool>,
    #[serde(default)]
    pub error_kind: Option<String>,
    #[serde(default)]
    pub error_contains: Option<String>,
}

impl PatchCase {
    pub fn operations(&self) -> Vec<Value> {
        let ops: Value = serde_json::from_str(&self.operations)
            .unwrap_or_else(|e| panic!("{}: operations are not JSON: {e}", self.name));
        match ops {
            Value::Array(ops) => ops,
            other => vec![other],
        }
    }

    pub fn expected(&self) -> Option<Value> {
        self.expected.as_ref().map(|text| {
            serde_json::from_str(text)
                .unwrap_or_else(|e| panic!("{}: expected document is not JSON: {e}", self.name))
        })
    }
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn load_cases(file: &str) -> Vec<PatchCase> {
    let path = fixtures_dir().join(file);
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    let cases: CaseFile =
        toml::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path));
    cases.case
}
