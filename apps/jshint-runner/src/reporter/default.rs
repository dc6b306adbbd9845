//! Default human-readable reporter.
//!
//! Prints a `[L<line>:C<col>] <code>: <reason>` header per diagnostic and the
//! offending source line with the reported column highlighted.

use super::{Batch, Reporter};
use crate::engine::LintEngine;
use crate::error::Result;
use crate::models::{LintError, LintOptions};
use crate::output::Sink;

/// Source fed to the engine to observe how it counts a tab.
const TAB_PROBE: &str = "\tx";
/// Stand-in for one tab column; never appears in real source.
const PLACEHOLDER: char = '\u{FFFF}';
const SOFT_TAB: &str = "  ";

/// How tabs in evidence are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRendering {
    /// Tabs count as one column: swap them for a soft tab directly.
    Direct,
    /// Tabs count as several columns: expand each into a placeholder run so
    /// column math lines up, then swap runs for a soft tab.
    Placeholder(String),
}

impl TabRendering {
    pub fn for_width(width: usize) -> Self {
        if width > 1 {
            Self::Placeholder(std::iter::repeat(PLACEHOLDER).take(width).collect())
        } else {
            Self::Direct
        }
    }
}

/// Visual width of one tab under `options`: the engine's declared value when
/// it has one, the probe otherwise.
pub fn tab_width(engine: &dyn LintEngine, options: &LintOptions) -> usize {
    match engine.declared_tab_width(options) {
        Some(w) if w > 0 => w,
        _ => probe_tab_width(engine, options),
    }
}

/// Lint a tab followed by one character and read the reported column back.
/// An inconclusive probe yields 1.
pub fn probe_tab_width(engine: &dyn LintEngine, options: &LintOptions) -> usize {
    match engine.lint_source(TAB_PROBE, options) {
        Ok(errors) => errors
            .first()
            .and_then(|e| e.character.checked_sub(1))
            .unwrap_or(1),
        Err(err) => {
            tracing::debug!(%err, "tab width probe failed");
            1
        }
    }
}

/// Render `evidence` with the 1-based `character` highlighted. Column 0
/// means start of line; a column past the end means end of line.
pub fn render_evidence(evidence: &str, character: usize, tabs: &TabRendering, sink: &Sink<'_>) -> String {
    let expanded = match tabs {
        TabRendering::Placeholder(run) => evidence.replace('\t', run),
        TabRendering::Direct => evidence.to_string(),
    };
    let chars: Vec<char> = expanded.chars().collect();
    let marked = if character == 0 {
        format!("{}{}", sink.highlight("?"), expanded)
    } else if character > chars.len() {
        format!("{}{}", expanded, sink.highlight(" "))
    } else {
        let before: String = chars[..character - 1].iter().collect();
        let target = chars[character - 1].to_string();
        let after: String = chars[character..].iter().collect();
        format!("{}{}{}", before, sink.highlight(&target), after)
    };
    match tabs {
        // a highlight can split a run; leftovers become single spaces
        TabRendering::Placeholder(run) => marked
            .replace(run.as_str(), SOFT_TAB)
            .replace(PLACEHOLDER, " "),
        TabRendering::Direct => marked.replace('\t', SOFT_TAB),
    }
}

pub struct DefaultReporter<'e> {
    engine: &'e dyn LintEngine,
}

impl<'e> DefaultReporter<'e> {
    pub fn new(engine: &'e dyn LintEngine) -> Self {
        Self { engine }
    }

    fn position(&self, err: &LintError, sink: &Sink<'_>) -> String {
        let pos = format!(
            "{}{}{}{}{}",
            sink.paint_red("["),
            sink.paint_yellow(&format!("L{}", err.line)),
            sink.paint_red(":"),
            sink.paint_yellow(&format!("C{}", err.character)),
            sink.paint_red("]"),
        );
        let code = match &err.code {
            Some(code) => format!("{}{} ", sink.paint_yellow(code), sink.paint_red(":")),
            None => String::new(),
        };
        format!("{} {}{}", pos, code, sink.paint_yellow(&err.reason))
    }
}

impl Reporter for DefaultReporter<'_> {
    /// Every result counts as one error, including a result with no error
    /// object, which is reported as a generic `>>` line.
    fn report(&self, batch: &Batch<'_>, sink: &mut Sink<'_>) -> Result<usize> {
        let first = batch.data.first();
        let msg = match first.map(|d| d.file.as_str()) {
            Some(file) if !file.is_empty() => format!("Linting {}...", file),
            _ => "Linting...".to_string(),
        };
        sink.verbose_write(&msg)?;

        if batch.results.is_empty() {
            sink.verbose_ok()?;
            return Ok(0);
        }

        let default_options = LintOptions::new();
        let options = first.map(|d| &d.options).unwrap_or(&default_options);
        let tabs = TabRendering::for_width(tab_width(self.engine, options));

        sink.normal_write(&msg)?;
        sink.error_marker()?;

        let mut count = 0;
        for result in batch.results {
            count += 1;
            let Some(err) = result.error.as_ref() else {
                sink.error(&format!("Unrecognized lint result for {}", result.file))?;
                continue;
            };
            let Some(evidence) = err.evidence.as_deref() else {
                // e.g. "Too many errors."
                sink.error(&err.reason)?;
                continue;
            };
            let header = self.position(err, sink);
            sink.writeln(&header)?;
            let line = render_evidence(evidence, err.character, &tabs, sink);
            sink.writeln(&line)?;
        }
        sink.writeln("")?;
        Ok(count)
    }
}
