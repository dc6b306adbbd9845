//! jshint-runner CLI binary entry point.
//! Resolves configuration, runs the lint pass, and maps the outcome to an
//! exit code.

use anyhow::Result;
use clap::Parser;
use jshint_runner::cli::{Cli, Commands, LintArgs};
use jshint_runner::config;
use jshint_runner::engine::JshintCommand;
use jshint_runner::error::Error;
use jshint_runner::lint::{run_lint, LintSettings};
use jshint_runner::output::{use_colors, Sink};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jshint_runner=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lint(args) => lint(&args),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            let code = err
                .downcast_ref::<Error>()
                .map(Error::exit_code)
                .unwrap_or(ExitCode::from(2));
            let prefix = if use_colors(true) {
                "Fatal error:".red().bold().to_string()
            } else {
                "Fatal error:".to_string()
            };
            eprintln!("{} {:#}", prefix, err);
            code
        }
    }
}

fn lint(args: &LintArgs) -> Result<ExitCode> {
    let eff = config::resolve_effective(&args.overrides())?;
    if config::load_config(&eff.root).is_none() {
        tracing::debug!(root = %eff.root.display(), "no jshint-runner config found; using defaults");
    }

    let engine = JshintCommand::new(eff.jshint.clone());
    let files: Vec<PathBuf> = args.files.iter().map(PathBuf::from).collect();
    let settings = LintSettings {
        cwd: std::env::current_dir()?,
        debug: eff.debug,
    };
    let mut sink = Sink::stdout(use_colors(eff.color), eff.verbose);

    let outcome = run_lint(&files, eff.options, &engine, &settings, &mut sink)?;

    // summary lines only make sense next to the default report
    if outcome.using_default_reporter {
        if outcome.results.is_empty() {
            let n = outcome.data.len().max(files.len());
            sink.ok(&format!("{} {} lint free.", n, plural(n, "file", "files")))?;
        } else {
            let errors = outcome.error_count;
            let nfiles = outcome.files_with_errors();
            sink.error(&format!(
                "{} {} in {} {}",
                errors,
                plural(errors, "error", "errors"),
                nfiles,
                plural(nfiles, "file", "files")
            ))?;
        }
        sink.flush()?;
    }

    if outcome.results.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
