//! jshint-runner core library.
//!
//! Drives a JSHint-compatible lint engine over a list of files, picks a
//! reporter for the results, and hands back everything the run produced.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `engine`: The lint engine seam and the `jshint` command-line engine.
//! - `lint`: The runner: option handling, fan-out, ordered aggregation.
//! - `reporter`: Reporter registry, selection, and the built-in reporters.
//! - `models`: Diagnostics, per-file data, and lint options.
//! - `output`: The output sink reporters write to.
//! - `error`: Error type and exit codes.
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lint;
pub mod models;
pub mod output;
pub mod reporter;
