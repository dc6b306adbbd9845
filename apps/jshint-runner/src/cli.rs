//! CLI argument parsing via `clap`.

use crate::config::Overrides;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "jshint-runner",
    version,
    about = "Run JSHint over a file list and report the results",
    long_about = "jshint-runner drives the jshint command line over a list of files, picks a reporter, and prints the results.\n\nConfiguration precedence: CLI > jshint-runner.toml > defaults.",
    after_help = "Examples:\n  jshint-runner lint src/app.js test/\n  jshint-runner lint --reporter checkstyle src/ > checkstyle.xml\n  jshint-runner lint --jshintrc .jshintrc --debug lib/",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current jshint-runner version.")]
    Version,
    /// Lint files with jshint
    #[command(
        about = "Lint files",
        long_about = "Lint every given file (directories expand to files with the configured extensions). Exits 1 when any diagnostic is reported.",
        after_help = "Examples:\n  jshint-runner lint app.js\n  jshint-runner lint --reporter jslint lib/\n  jshint-runner lint --option curly=true --option maxerr=10 lib/"
    )]
    Lint(LintArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct LintArgs {
    #[arg(required = true, help = "Files or directories to lint, in report order")]
    pub files: Vec<String>,
    #[arg(long, help = "Project root used for config discovery (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, help = "Reporter: jslint|checkstyle|<path to reporter program>")]
    pub reporter: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Use the JSLint XML reporter")]
    pub jslint_reporter: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Use the CheckStyle XML reporter")]
    pub checkstyle_reporter: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Also report implied globals and unused variables")]
    pub show_non_errors: bool,
    #[arg(long, help = "Comma separated extensions linted inside directories (default: js)")]
    pub extra_ext: Option<String>,
    #[arg(long, help = "JSON options file; replaces every other lint option")]
    pub jshintrc: Option<String>,
    #[arg(long, help = "jshint program to run (default: jshint)")]
    pub jshint: Option<String>,
    #[arg(long = "option", short = 'o', value_name = "KEY=VALUE", help = "Lint option forwarded to jshint (repeatable)")]
    pub options: Vec<String>,
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL",
        help = "Force devel/debug options; when true also lifts maxerr"
    )]
    pub debug: Option<bool>,
    #[arg(long, short = 'v', action = clap::ArgAction::SetTrue, help = "Verbose output")]
    pub verbose: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable colored output")]
    pub no_color: bool,
}

impl LintArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            reporter: self.reporter.clone(),
            jslint_reporter: self.jslint_reporter,
            checkstyle_reporter: self.checkstyle_reporter,
            show_non_errors: self.show_non_errors,
            extra_ext: self.extra_ext.clone(),
            jshintrc: self.jshintrc.clone(),
            jshint: self.jshint.clone(),
            options: self.options.clone(),
            debug: self.debug,
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }
}
