//! Lint engine seam.
//!
//! The runner never lints JavaScript itself; it talks to a [`LintEngine`].
//! [`JshintCommand`] drives the `jshint` executable and turns its
//! non-error report back into structured results.

use crate::error::{Error, Result};
use crate::models::{FileData, FileReport, ImpliedGlobal, LintError, LintOptions, LintResult, UnusedVariable};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// An external lint engine.
///
/// Implementations must be shareable across threads: the runner lints files
/// concurrently.
pub trait LintEngine: Sync {
    /// Lint one path. A directory expands to every file under it whose
    /// extension is listed in `extensions` (comma separated, no dots).
    fn lint_file(&self, path: &Path, options: &LintOptions, extensions: &str) -> Result<FileReport>;

    /// Lint an in-memory source string with the same options.
    fn lint_source(&self, source: &str, options: &LintOptions) -> Result<Vec<LintError>>;

    /// Visual width of one tab, when the engine exposes it directly.
    fn declared_tab_width(&self, _options: &LintOptions) -> Option<usize> {
        None
    }
}

/// Expand `path` into the files to lint. Plain files are always linted,
/// whatever their extension.
pub fn expand_path(path: &Path, extensions: &str) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = Vec::new();
    for ext in extensions.split(',').map(|e| e.trim().trim_start_matches('.')) {
        if ext.is_empty() {
            continue;
        }
        let pattern = path.join("**").join(format!("*.{}", ext));
        let pattern = pattern.to_string_lossy().to_string();
        let Ok(entries) = glob::glob(&pattern) else {
            tracing::warn!(%pattern, "invalid extension pattern");
            continue;
        };
        files.extend(entries.flatten().filter(|p| p.is_file()));
    }
    files.sort();
    files.dedup();
    files
}

/// Engine backed by the `jshint` command line.
pub struct JshintCommand {
    program: String,
}

impl Default for JshintCommand {
    fn default() -> Self {
        Self::new("jshint")
    }
}

impl JshintCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn write_config(&self, options: &LintOptions) -> Result<tempfile::NamedTempFile> {
        let mut cfg = tempfile::Builder::new()
            .prefix("jshint-runner-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(cfg.as_file_mut(), &options.engine_options())?;
        cfg.as_file_mut().flush()?;
        Ok(cfg)
    }

    fn command(&self, config: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--verbose")
            .arg("--show-non-errors")
            .arg("--config")
            .arg(config);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::Engine {
            program: self.program.clone(),
            source,
        }
    }

    /// jshint exits 0 (clean), 2 (diagnostics). Anything else with nothing
    /// parsed is treated as an engine failure.
    fn check_status(&self, code: Option<i32>, parsed: &ParsedOutput, stderr: &str) -> Result<()> {
        match code {
            Some(0) | Some(2) => Ok(()),
            _ if !parsed.results.is_empty() => Ok(()),
            _ => Err(Error::EngineFailure {
                program: self.program.clone(),
                message: if stderr.trim().is_empty() {
                    format!("exited with status {:?}", code)
                } else {
                    stderr.trim().to_string()
                },
            }),
        }
    }
}

impl LintEngine for JshintCommand {
    fn lint_file(&self, path: &Path, options: &LintOptions, extensions: &str) -> Result<FileReport> {
        let files = expand_path(path, extensions);
        if files.is_empty() {
            tracing::debug!(path = %path.display(), "no lintable files");
            return Ok(FileReport::default());
        }
        let cfg = self.write_config(options)?;
        let output = self
            .command(cfg.path())
            .args(&files)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut parsed = parse_output(&stdout);
        self.check_status(output.status.code(), &parsed, &stderr)?;
        tracing::debug!(
            path = %path.display(),
            files = files.len(),
            results = parsed.results.len(),
            "jshint finished"
        );

        fill_evidence(&mut parsed.results);

        let engine_options = options.engine_options();
        let data = files
            .iter()
            .map(|f| {
                let name = f.to_string_lossy().to_string();
                let mut fd = FileData::new(name.clone(), engine_options.clone());
                if let Some(section) = parsed.sections.remove(&name) {
                    fd.implieds = section.implieds;
                    fd.unused = section.unused;
                }
                fd
            })
            .collect();
        Ok(FileReport {
            results: parsed.results,
            data,
        })
    }

    fn lint_source(&self, source: &str, options: &LintOptions) -> Result<Vec<LintError>> {
        let cfg = self.write_config(options)?;
        let mut child = self
            .command(cfg.path())
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        let parsed = parse_output(&String::from_utf8_lossy(&output.stdout));
        self.check_status(
            output.status.code(),
            &parsed,
            &String::from_utf8_lossy(&output.stderr),
        )?;
        Ok(parsed.results.into_iter().filter_map(|r| r.error).collect())
    }
}

#[derive(Debug, Default)]
struct NonErrorSection {
    implieds: Vec<ImpliedGlobal>,
    unused: Vec<UnusedVariable>,
}

#[derive(Debug, Default)]
struct ParsedOutput {
    results: Vec<LintResult>,
    sections: HashMap<String, NonErrorSection>,
}

fn error_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // position fields read `undefined` when jshint has no location, e.g. "Can't open"
        Regex::new(r"^(.+): line ([^,\s]+), col ([^,\s]+), (.*?)(?: \(([EWI]\d+)\))?$").unwrap()
    })
}

fn unused_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^\s,()]+)\((\d+)\)").unwrap())
}

#[derive(Clone, Copy, PartialEq)]
enum SectionPart {
    None,
    Implied,
    Unused,
}

/// Parse the verbose non-error report printed by `jshint`.
fn parse_output(stdout: &str) -> ParsedOutput {
    let mut out = ParsedOutput::default();
    let mut current: Option<String> = None;
    let mut part = SectionPart::None;

    for raw in stdout.lines() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with('\t') {
            if let Some(caps) = error_line_re().captures(line) {
                let parse = |i: usize| caps[i].parse::<usize>().unwrap_or(0);
                out.results.push(LintResult {
                    file: caps[1].to_string(),
                    error: Some(LintError {
                        line: parse(2),
                        character: parse(3),
                        reason: caps[4].to_string(),
                        code: caps.get(5).map(|m| m.as_str().to_string()),
                        evidence: None,
                    }),
                });
                current = None;
            } else if let Some(file) = line.strip_suffix(" :") {
                out.sections.entry(file.to_string()).or_default();
                current = Some(file.to_string());
            }
            part = SectionPart::None;
            continue;
        }
        let Some(file) = current.as_ref() else {
            continue;
        };
        let body = line.trim();
        match body {
            "Implied globals:" => part = SectionPart::Implied,
            "Unused Variables:" => part = SectionPart::Unused,
            _ => {
                let Some(section) = out.sections.get_mut(file) else {
                    continue;
                };
                match part {
                    SectionPart::Implied => {
                        if let Some((name, lines)) = body.split_once(": ") {
                            section.implieds.push(ImpliedGlobal {
                                name: name.to_string(),
                                lines: lines
                                    .split(',')
                                    .filter_map(|l| l.trim().parse().ok())
                                    .collect(),
                            });
                        }
                    }
                    SectionPart::Unused => {
                        for caps in unused_re().captures_iter(body) {
                            section.unused.push(UnusedVariable {
                                name: caps[1].to_string(),
                                line: caps[2].parse().unwrap_or(0),
                            });
                        }
                    }
                    SectionPart::None => {}
                }
            }
        }
    }
    out
}

/// jshint's text report does not carry the source line; read it back.
fn fill_evidence(results: &mut [LintResult]) {
    let mut cache: HashMap<String, Option<Vec<String>>> = HashMap::new();
    for result in results.iter_mut() {
        let Some(err) = result.error.as_mut() else {
            continue;
        };
        if err.evidence.is_some() || err.line == 0 {
            continue;
        }
        let lines = cache.entry(result.file.clone()).or_insert_with(|| {
            fs::read_to_string(&result.file)
                .ok()
                .map(|s| s.lines().map(|l| l.trim_end_matches('\r').to_string()).collect())
        });
        if let Some(lines) = lines {
            err.evidence = lines.get(err.line - 1).cloned();
        }
    }
}
