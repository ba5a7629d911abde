//! Engine error types

use fuelhub_core::CoreError;
use fuelhub_repo::RepoError;
use miette::Diagnostic;
use thiserror::Error;

/// Main engine error type
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Repository error: {0}")]
    #[diagnostic(code(fuelhub::repo))]
    Repo(#[from] RepoError),

    #[error("Not found: {what}")]
    #[diagnostic(code(fuelhub::not_found))]
    NotFound { what: String },

    #[error("Invalid value for '{field}': {message}")]
    #[diagnostic(code(fuelhub::invalid_value))]
    InvalidValue { field: String, message: String },

    #[error("Version {requested} not found (latest is {latest})")]
    #[diagnostic(
        code(fuelhub::version_not_found),
        help("request a version between 1 and {latest}, or 'tip'")
    )]
    VersionNotFound { requested: u32, latest: u32 },

    #[error("Unexpected error: {message}")]
    #[diagnostic(code(fuelhub::unexpected))]
    Unexpected { message: String },

    #[error("Catalog error: {0}")]
    #[diagnostic(code(fuelhub::catalog))]
    Catalog(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(fuelhub::io))]
    Io(#[from] std::io::Error),
}

/// Coarse error category, for callers mapping failures to transport codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    Repo,
    NotFound,
    InvalidValue,
    VersionNotFound,
    Unexpected,
    Catalog,
    Io,
}

impl EngineError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Repo(e) if e.is_not_found() => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Repo,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::VersionNotFound { .. } => ErrorKind::VersionNotFound,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
            Self::Catalog(_) => ErrorKind::Catalog,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidValue { field, message } => Self::InvalidValue { field, message },
            CoreError::Io(e) => Self::Io(e),
            other => Self::unexpected(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
