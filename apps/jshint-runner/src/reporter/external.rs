//! Reporter implemented by an external program.
//!
//! The program receives `{"results": [...], "data": [...], "verbose": bool}`
//! as JSON on stdin and whatever it prints on stdout becomes the report.

use super::{Batch, Reporter};
use crate::error::{Error, Result};
use crate::models::{FileData, LintResult};
use crate::output::Sink;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Serialize)]
struct Payload<'a> {
    results: &'a [LintResult],
    data: &'a [FileData],
    verbose: bool,
}

#[derive(Debug)]
pub struct ExternalReporter {
    path: PathBuf,
}

impl ExternalReporter {
    /// Resolve the reporter program. Fails when `path` is not an executable
    /// file.
    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|e| Error::ReporterLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !meta.is_file() {
            return Err(Error::ReporterLoad {
                path: path.to_path_buf(),
                reason: "not a file".to_string(),
            });
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if meta.permissions().mode() & 0o111 == 0 {
                return Err(Error::ReporterLoad {
                    path: path.to_path_buf(),
                    reason: "not executable".to_string(),
                });
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn failure(&self, message: impl Into<String>) -> Error {
        Error::ExternalReporter {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

impl Reporter for ExternalReporter {
    fn report(&self, batch: &Batch<'_>, sink: &mut Sink<'_>) -> Result<usize> {
        let payload = serde_json::to_vec(&Payload {
            results: batch.results,
            data: batch.data,
            verbose: sink.verbose(),
        })?;
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(e.to_string()))?;
        if let Some(mut stdin) = child.stdin.take() {
            // reporters are free to ignore their input
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }
        let output = child
            .wait_with_output()
            .map_err(|e| self.failure(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        sink.write(&String::from_utf8_lossy(&output.stdout))?;
        Ok(batch.errors().count())
    }
}
