//! Output sink shared by the runner and every reporter.
//!
//! Provides the verbose/normal/error channels a lint report needs, plus a
//! color switch. Nothing here touches global state: whoever builds the sink
//! decides where text goes and whether it is styled.

use crate::models::LintOptions;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Whether colored output should be used. `NO_COLOR` always wins.
pub fn use_colors(requested: bool) -> bool {
    requested && std::env::var_os("NO_COLOR").is_none()
}

pub struct Sink<'a> {
    out: Box<dyn Write + 'a>,
    color: bool,
    verbose: bool,
}

impl<'a> Sink<'a> {
    pub fn new(out: impl Write + 'a, color: bool, verbose: bool) -> Self {
        Self {
            out: Box::new(out),
            color,
            verbose,
        }
    }

    /// Sink writing to the process stdout.
    pub fn stdout(color: bool, verbose: bool) -> Sink<'static> {
        Sink::new(io::stdout(), color, verbose)
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn paint_red(&self, s: &str) -> String {
        if self.color {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn paint_yellow(&self, s: &str) -> String {
        if self.color {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn paint_green(&self, s: &str) -> String {
        if self.color {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    /// Inverse red, used to point at the offending character.
    pub fn highlight(&self, s: &str) -> String {
        if self.color {
            s.red().reversed().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn write(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }

    pub fn writeln(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())?;
        self.out.write_all(b"\n")
    }

    /// Written only in verbose mode.
    pub fn verbose_write(&mut self, s: &str) -> io::Result<()> {
        if self.verbose {
            self.write(s)?;
        }
        Ok(())
    }

    /// Written only when *not* in verbose mode.
    pub fn normal_write(&mut self, s: &str) -> io::Result<()> {
        if !self.verbose {
            self.write(s)?;
        }
        Ok(())
    }

    pub fn verbose_ok(&mut self) -> io::Result<()> {
        if self.verbose {
            let ok = self.paint_green("OK");
            self.writeln(&ok)?;
        }
        Ok(())
    }

    /// Bare `ERROR` marker closing a status line.
    pub fn error_marker(&mut self) -> io::Result<()> {
        let e = self.paint_red("ERROR");
        self.writeln(&e)
    }

    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        let line = format!("{} {}", self.paint_red(">>"), msg);
        self.writeln(&line)
    }

    pub fn ok(&mut self, msg: &str) -> io::Result<()> {
        let line = format!("{} {}", self.paint_green(">>"), msg);
        self.writeln(&line)
    }

    /// Verbose dump of the options in effect.
    pub fn verbose_flags(&mut self, options: &LintOptions, prefix: &str) -> io::Result<()> {
        if self.verbose {
            let line = format!("{}: {}", prefix, options.flags_summary());
            self.writeln(&line)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
