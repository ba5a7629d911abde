//! CLI error types with exit code handling

use fuelhub_core::CoreError;
use fuelhub_engine::{EngineError, ErrorKind};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),

    /// No live catalog record with this UUID
    #[error("Resource '{uuid}' not found")]
    #[diagnostic(
        code(fuelhub::cli::not_found),
        help("run `fuelhub list` to see live resources")
    )]
    ResourceNotFound { uuid: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(fuelhub::cli::config))]
    Config(#[from] CoreError),

    #[error("IO error: {message}")]
    #[diagnostic(code(fuelhub::cli::io))]
    Io { message: String },

    #[error("{message}")]
    #[diagnostic(code(fuelhub::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(e) => match e.kind() {
                ErrorKind::InvalidValue => exit_codes::INVALID_VALUE,
                ErrorKind::NotFound => exit_codes::NOT_FOUND,
                ErrorKind::VersionNotFound => exit_codes::VERSION_NOT_FOUND,
                ErrorKind::Io => exit_codes::IO_ERROR,
                _ => exit_codes::ERROR,
            },
            CliError::ResourceNotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Config(CoreError::InvalidValue { .. }) => exit_codes::INVALID_VALUE,
            CliError::Config(_) => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    pub fn resource_not_found(uuid: impl Into<String>) -> Self {
        Self::ResourceNotFound { uuid: uuid.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
