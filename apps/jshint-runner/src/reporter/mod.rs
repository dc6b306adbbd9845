//! Reporters and reporter selection.
//!
//! A reporter turns one file's batch of results into text on a [`Sink`] and
//! returns how many errors it reported. The set of built-in reporters is a
//! closed registry; anything else is an external program loaded once, when
//! the reporter is selected.

mod checkstyle;
mod default;
mod external;
mod jslint_xml;
mod non_error;

pub use checkstyle::CheckstyleReporter;
pub use default::{probe_tab_width, render_evidence, tab_width, DefaultReporter, TabRendering};
pub use external::ExternalReporter;
pub use jslint_xml::JslintXmlReporter;
pub use non_error::NonErrorReporter;

use crate::engine::LintEngine;
use crate::error::Result;
use crate::models::options::{CHECKSTYLE_REPORTER, JSLINT_REPORTER, REPORTER, SHOW_NON_ERRORS};
use crate::models::{FileData, LintError, LintOptions, LintResult};
use crate::output::Sink;
use std::path::{Path, PathBuf};

/// One file's results and metadata, as handed to a reporter.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    pub results: &'a [LintResult],
    pub data: &'a [FileData],
}

impl<'a> Batch<'a> {
    pub fn new(results: &'a [LintResult], data: &'a [FileData]) -> Self {
        Self { results, data }
    }

    /// Results that carry a structured error, paired with their file.
    pub fn errors(&self) -> impl Iterator<Item = (&'a str, &'a LintError)> + 'a {
        let results = self.results;
        results
            .iter()
            .filter_map(|r| r.error.as_ref().map(|e| (r.file.as_str(), e)))
    }
}

pub trait Reporter {
    /// Write the report for `batch`; returns the number of errors reported.
    fn report(&self, batch: &Batch<'_>, sink: &mut Sink<'_>) -> Result<usize>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterKind {
    Default,
    JslintXml,
    Checkstyle,
    NonError,
    External(PathBuf),
}

impl ReporterKind {
    /// Pick a reporter kind from the options. First match wins.
    pub fn from_options(options: &LintOptions, cwd: &Path) -> Self {
        let reporter = options.str_value(REPORTER);
        if reporter == Some("jslint") || options.is_truthy(JSLINT_REPORTER) {
            Self::JslintXml
        } else if reporter == Some("checkstyle") || options.is_truthy(CHECKSTYLE_REPORTER) {
            Self::Checkstyle
        } else if options.is_truthy(SHOW_NON_ERRORS) {
            Self::NonError
        } else {
            match reporter {
                Some(r) if !r.is_empty() => Self::External(cwd.join(r)),
                _ => Self::Default,
            }
        }
    }
}

/// The reporter chosen for one run.
pub struct Selection<'e> {
    pub reporter: Box<dyn Reporter + 'e>,
    pub kind: ReporterKind,
    /// True when the built-in default reporter is the one in use.
    pub using_default: bool,
}

/// Resolve the reporter for a run. Loading an external reporter that cannot
/// be found is fatal.
pub fn select_reporter<'e>(
    options: &LintOptions,
    cwd: &Path,
    engine: &'e dyn LintEngine,
) -> Result<Selection<'e>> {
    let kind = ReporterKind::from_options(options, cwd);
    let reporter: Box<dyn Reporter + 'e> = match &kind {
        ReporterKind::Default => Box::new(DefaultReporter::new(engine)),
        ReporterKind::JslintXml => Box::new(JslintXmlReporter),
        ReporterKind::Checkstyle => Box::new(CheckstyleReporter),
        ReporterKind::NonError => Box::new(NonErrorReporter),
        ReporterKind::External(path) => Box::new(ExternalReporter::load(path)?),
    };
    tracing::debug!(?kind, "selected reporter");
    Ok(Selection {
        using_default: kind == ReporterKind::Default,
        reporter,
        kind,
    })
}

/// Escape text for an XML attribute value.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Group errors by file name (leading `./` dropped), keeping first-seen order.
pub(crate) fn group_by_file<'a>(batch: &Batch<'a>) -> Vec<(String, Vec<&'a LintError>)> {
    let mut groups: Vec<(String, Vec<&'a LintError>)> = Vec::new();
    for (file, err) in batch.errors() {
        let name = file.strip_prefix("./").unwrap_or(file);
        match groups.iter_mut().find(|(f, _)| f == name) {
            Some((_, errs)) => errs.push(err),
            None => groups.push((name.to_string(), vec![err])),
        }
    }
    groups
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::error::Result;
    use crate::models::FileReport;

    /// Engine that lints nothing and answers the tab probe with a fixed
    /// column.
    pub struct ProbeEngine {
        pub probe_character: Option<usize>,
        pub declared: Option<usize>,
    }

    impl LintEngine for ProbeEngine {
        fn lint_file(&self, _: &Path, _: &LintOptions, _: &str) -> Result<FileReport> {
            Ok(FileReport::default())
        }

        fn lint_source(&self, _: &str, _: &LintOptions) -> Result<Vec<LintError>> {
            Ok(self
                .probe_character
                .map(|c| LintError {
                    line: 1,
                    character: c,
                    reason: "Expected an assignment or function call and instead saw an expression.".into(),
                    code: Some("W030".into()),
                    evidence: Some("\tx".into()),
                })
                .into_iter()
                .collect())
        }

        fn declared_tab_width(&self, _: &LintOptions) -> Option<usize> {
            self.declared
        }
    }

    pub fn error(file: &str, line: usize, character: usize, reason: &str, code: Option<&str>, evidence: Option<&str>) -> LintResult {
        LintResult {
            file: file.to_string(),
            error: Some(LintError {
                line,
                character,
                reason: reason.to_string(),
                code: code.map(str::to_string),
                evidence: evidence.map(str::to_string),
            }),
        }
    }

    pub fn render(reporter: &dyn Reporter, batch: &Batch<'_>, verbose: bool) -> (String, usize) {
        let mut buf = Vec::new();
        let count = {
            let mut sink = Sink::new(&mut buf, false, verbose);
            reporter.report(batch, &mut sink).unwrap()
        };
        (String::from_utf8(buf).unwrap(), count)
    }
}
