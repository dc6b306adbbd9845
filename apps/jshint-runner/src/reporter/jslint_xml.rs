//! JSLint-compatible XML reporter.

use super::{group_by_file, xml_escape, Batch, Reporter};
use crate::error::Result;
use crate::output::Sink;

pub struct JslintXmlReporter;

impl Reporter for JslintXmlReporter {
    fn report(&self, batch: &Batch<'_>, sink: &mut Sink<'_>) -> Result<usize> {
        let groups = group_by_file(batch);
        let mut out = vec![
            r#"<?xml version="1.0" encoding="utf-8"?>"#.to_string(),
            "<jslint>".to_string(),
        ];
        let mut count = 0;
        for (file, errors) in &groups {
            out.push(format!("\t<file name=\"{}\">", xml_escape(file)));
            for err in errors {
                let severity = err
                    .severity_letter()
                    .map(|c| format!(" severity=\"{}\"", xml_escape(&c.to_string())))
                    .unwrap_or_default();
                out.push(format!(
                    "\t\t<issue line=\"{}\" char=\"{}\" reason=\"{}\" evidence=\"{}\"{} />",
                    err.line,
                    err.character,
                    xml_escape(&err.reason),
                    xml_escape(err.evidence.as_deref().unwrap_or("")),
                    severity,
                ));
                count += 1;
            }
            out.push("\t</file>".to_string());
        }
        out.push("</jslint>".to_string());
        sink.writeln(&out.join("\n"))?;
        Ok(count)
    }
}
