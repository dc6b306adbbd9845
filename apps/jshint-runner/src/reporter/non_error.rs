//! Reporter that also lists implied globals and unused variables.

use super::{Batch, Reporter};
use crate::error::Result;
use crate::output::Sink;

pub struct NonErrorReporter;

impl Reporter for NonErrorReporter {
    fn report(&self, batch: &Batch<'_>, sink: &mut Sink<'_>) -> Result<usize> {
        let mut out = String::new();
        let mut count = 0;
        for (file, err) in batch.errors() {
            out.push_str(&format!(
                "{}: line {}, col {}, {}",
                file, err.line, err.character, err.reason
            ));
            if sink.verbose() {
                if let Some(code) = &err.code {
                    out.push_str(&format!(" ({})", code));
                }
            }
            out.push('\n');
            count += 1;
        }
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            out.push_str(&format!("\n{} error{}", count, plural));
        }

        for data in batch.data {
            if data.implieds.is_empty() && data.unused.is_empty() {
                continue;
            }
            out.push_str(&format!("\n\n{} :\n", data.file));
            if !data.implieds.is_empty() {
                out.push_str("\tImplied globals:\n");
                for global in &data.implieds {
                    let lines: Vec<String> = global.lines.iter().map(|l| l.to_string()).collect();
                    out.push_str(&format!("\t\t{}: {}\n", global.name, lines.join(",")));
                }
            }
            if !data.unused.is_empty() {
                out.push_str("\tUnused Variables:\n\t\t");
                for unused in &data.unused {
                    out.push_str(&format!("{}({}), ", unused.name, unused.line));
                }
            }
        }

        if !out.is_empty() {
            out.push('\n');
            sink.writeln(&out)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::{FileData, ImpliedGlobal, LintOptions, UnusedVariable};

    #[test]
    fn test_errors_and_non_errors() {
        let results = vec![error("a.js", 3, 1, "'module' is not defined.", Some("W117"), None)];
        let mut data = FileData::new("a.js", LintOptions::new());
        data.implieds.push(ImpliedGlobal { name: "module".into(), lines: vec![3, 5] });
        data.unused.push(UnusedVariable { name: "x".into(), line: 1 });
        let data = vec![data];
        let (out, count) = render(&NonErrorReporter, &Batch::new(&results, &data), true);
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "a.js: line 3, col 1, 'module' is not defined. (W117)\n\
             \n1 error\
             \n\na.js :\n\
             \tImplied globals:\n\
             \t\tmodule: 3,5\n\
             \tUnused Variables:\n\
             \t\tx(1), \n\n"
        );
    }

    #[test]
    fn test_clean_file_prints_nothing() {
        let data = vec![FileData::new("a.js", LintOptions::new())];
        let (out, count) = render(&NonErrorReporter, &Batch::new(&[], &data), false);
        assert_eq!(count, 0);
        assert!(out.is_empty());
    }
}
