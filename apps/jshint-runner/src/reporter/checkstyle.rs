//! CheckStyle XML reporter.

use super::{group_by_file, xml_escape, Batch, Reporter};
use crate::error::Result;
use crate::models::LintError;
use crate::output::Sink;

pub struct CheckstyleReporter;

fn severity(err: &LintError) -> &'static str {
    match err.severity_letter() {
        Some('I') => "info",
        Some('W') => "warning",
        Some('E') => "error",
        _ => "",
    }
}

impl Reporter for CheckstyleReporter {
    fn report(&self, batch: &Batch<'_>, sink: &mut Sink<'_>) -> Result<usize> {
        let groups = group_by_file(batch);
        let mut out = vec![
            r#"<?xml version="1.0" encoding="utf-8"?>"#.to_string(),
            r#"<checkstyle version="4.3">"#.to_string(),
        ];
        let mut count = 0;
        for (file, errors) in &groups {
            out.push(format!("\t<file name=\"{}\">", xml_escape(file)));
            for err in errors {
                let mut message = err.reason.clone();
                let code = err.code.as_deref().unwrap_or("");
                if sink.verbose() && !code.is_empty() {
                    message = format!("{} ({})", message, code);
                }
                let source = if code.is_empty() {
                    "jshint".to_string()
                } else {
                    format!("jshint.{}", code)
                };
                out.push(format!(
                    "\t\t<error line=\"{}\" column=\"{}\" severity=\"{}\" message=\"{}\" source=\"{}\" />",
                    err.line,
                    err.character,
                    severity(err),
                    xml_escape(&message),
                    xml_escape(&source),
                ));
                count += 1;
            }
            out.push("\t</file>".to_string());
        }
        out.push("</checkstyle>".to_string());
        sink.writeln(&out.join("\n"))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_checkstyle_document() {
        let results = vec![
            error("lib/a.js", 1, 10, "Missing semicolon.", Some("W033"), None),
            error("lib/a.js", 4, 2, "Unmatched '{'.", Some("E019"), None),
            error("lib/b.js", 7, 3, "Note & stuff", Some("I003"), None),
        ];
        let (out, count) = render(&CheckstyleReporter, &Batch::new(&results, &[]), false);
        assert_eq!(count, 3);
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<checkstyle version=\"4.3\">\n"));
        assert!(out.contains(
            "\t\t<error line=\"1\" column=\"10\" severity=\"warning\" message=\"Missing semicolon.\" source=\"jshint.W033\" />"
        ));
        assert!(out.contains("severity=\"error\" message=\"Unmatched &apos;{&apos;.\""));
        assert!(out.contains("severity=\"info\" message=\"Note &amp; stuff\""));
        assert_eq!(out.matches("<file name=").count(), 2);
        assert!(out.ends_with("</checkstyle>\n"));
    }

    #[test]
    fn test_verbose_appends_code_to_message() {
        let results = vec![error("a.js", 1, 10, "Missing semicolon.", Some("W033"), None)];
        let (out, _) = render(&CheckstyleReporter, &Batch::new(&results, &[]), true);
        assert!(out.contains("message=\"Missing semicolon. (W033)\""));
    }
}
