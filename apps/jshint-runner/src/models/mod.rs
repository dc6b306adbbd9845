//! Shared data models: lint diagnostics, per-file metadata, and options.

pub mod options;

pub use options::LintOptions;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One diagnostic as produced by the lint engine.
pub struct LintError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, or 0 for "start of line".
    pub character: usize,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Raw source line the diagnostic refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl LintError {
    /// Severity letter derived from the code prefix (`E`, `W`, `I`).
    pub fn severity_letter(&self) -> Option<char> {
        self.code.as_ref().and_then(|c| c.chars().next())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single lint result. `error` is `None` when the engine emitted a result
/// without a structured error object.
pub struct LintResult {
    pub file: String,
    pub error: Option<LintError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpliedGlobal {
    pub name: String,
    pub lines: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedVariable {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-file metadata handed to reporters alongside the results.
pub struct FileData {
    pub file: String,
    pub options: LintOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implieds: Vec<ImpliedGlobal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unused: Vec<UnusedVariable>,
}

impl FileData {
    pub fn new(file: impl Into<String>, options: LintOptions) -> Self {
        Self {
            file: file.into(),
            options,
            implieds: Vec::new(),
            unused: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Output of one engine invocation: the results and metadata for every file
/// the engine visited (a directory argument may expand to several files).
pub struct FileReport {
    pub results: Vec<LintResult>,
    pub data: Vec<FileData>,
}
