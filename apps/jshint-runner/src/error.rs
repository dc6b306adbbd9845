//! Error types and exit codes for jshint-runner.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Fatal errors. Lint diagnostics are never reported through this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to load reporter '{path}': {reason}")]
    ReporterLoad { path: PathBuf, reason: String },

    #[error("Reporter '{path}' failed: {message}")]
    ExternalReporter { path: PathBuf, message: String },

    #[error("Unable to read config file '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file '{path}' is not valid JSON: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file '{path}' must contain a JSON object")]
    ConfigNotObject { path: PathBuf },

    #[error("Failed to run lint engine '{program}': {source}")]
    Engine {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lint engine '{program}' failed: {message}")]
    EngineFailure { program: String, message: String },

    #[error("Invalid option '{0}': expected key=value")]
    InvalidOption(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code used by the binary when a run aborts.
    ///
    /// Code 1 is reserved for "diagnostics found", so every fatal error maps
    /// to 2 or above.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ReporterLoad { .. } | Self::ExternalReporter { .. } => ExitCode::from(3),
            Self::Engine { .. } | Self::EngineFailure { .. } => ExitCode::from(4),
            _ => ExitCode::from(2),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
