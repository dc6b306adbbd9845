//! Lint runner: drives the engine over a file list and reports each file.
//!
//! Files are linted concurrently; reporting and accumulation happen on the
//! calling thread in input order, so the combined results never depend on
//! which file finished first.

use crate::config::read_jshintrc;
use crate::engine::LintEngine;
use crate::error::Result;
use crate::models::options::{EXTRA_EXT, JSHINTRC};
use crate::models::{FileData, FileReport, LintOptions, LintResult};
use crate::output::Sink;
use crate::reporter::{select_reporter, Batch, ReporterKind};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSIONS: &str = "js";

/// Run-wide settings that are not lint options.
#[derive(Debug, Clone, Default)]
pub struct LintSettings {
    /// Directory external reporter paths are resolved against.
    pub cwd: PathBuf,
    /// Debug toggle. `None` leaves the options untouched.
    pub debug: Option<bool>,
}

#[derive(Debug)]
/// Everything a run produced, in input file order.
pub struct LintOutcome {
    pub results: Vec<LintResult>,
    pub data: Vec<FileData>,
    /// Errors counted by the reporter.
    pub error_count: usize,
    pub reporter: ReporterKind,
    pub using_default_reporter: bool,
}

impl LintOutcome {
    /// Number of distinct files with at least one result.
    pub fn files_with_errors(&self) -> usize {
        let mut files: Vec<&str> = self.results.iter().map(|r| r.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

/// Lint `files` with `options`.
///
/// - `extra-ext` is consumed here (default `js`) and never reaches the engine.
/// - The reporter is selected once, from the options as given.
/// - A `jshintrc` path replaces the whole option set with the file's content.
/// - An explicit debug toggle forces `devel`/`debug` and, when on, lifts
///   `maxerr`.
pub fn run_lint(
    files: &[PathBuf],
    options: LintOptions,
    engine: &dyn LintEngine,
    settings: &LintSettings,
    sink: &mut Sink<'_>,
) -> Result<LintOutcome> {
    let mut options = options;
    let extensions = options
        .remove(EXTRA_EXT)
        .and_then(|v| v.as_str().map(str::to_string))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.to_string());

    let selection = select_reporter(&options, &settings.cwd, engine)?;

    if let Some(path) = options.str_value(JSHINTRC).map(PathBuf::from) {
        tracing::debug!(path = %path.display(), "options replaced by jshintrc");
        options = read_jshintrc(&path)?;
    }

    sink.verbose_flags(&options, "JSHint options")?;

    if let Some(debug) = settings.debug {
        options.apply_debug(debug);
    }

    let engine_options = options.engine_options();
    tracing::debug!(files = files.len(), %extensions, "linting");
    let reports: Vec<Result<FileReport>> = files
        .par_iter()
        .map(|path| lint_one(engine, path, &engine_options, &extensions))
        .collect();

    let mut all_results: Vec<LintResult> = Vec::new();
    let mut all_data: Vec<FileData> = Vec::new();
    let mut error_count = 0usize;
    for report in reports {
        let report = report?;
        let batch = Batch::new(&report.results, &report.data);
        error_count += selection.reporter.report(&batch, sink)?;
        all_results.extend(report.results);
        all_data.extend(report.data);
    }
    sink.flush()?;

    Ok(LintOutcome {
        results: all_results,
        data: all_data,
        error_count,
        reporter: selection.kind,
        using_default_reporter: selection.using_default,
    })
}

fn lint_one(
    engine: &dyn LintEngine,
    path: &Path,
    options: &LintOptions,
    extensions: &str,
) -> Result<FileReport> {
    let report = engine.lint_file(path, options, extensions)?;
    tracing::trace!(path = %path.display(), results = report.results.len(), "file linted");
    Ok(report)
}
