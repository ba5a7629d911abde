//! Error types for repository operations

use thiserror::Error;

/// Repository operation errors
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Repository does not exist: {path}")]
    RepositoryMissing { path: String },

    #[error("Repository already initialized: {path}")]
    AlreadyExists { path: String },

    #[error("Unknown revision: {rev}")]
    RevisionNotFound { rev: String },

    #[error("File not found: {path} at revision {rev}")]
    FileNotFound { path: String, rev: String },

    #[error("Tag already exists: {name}")]
    TagExists { name: String },

    #[error("Walk aborted at {path}: {message}")]
    Walk { path: String, message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepoError>;

impl RepoError {
    /// Whether the error means the requested file or revision is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepoError::FileNotFound { .. } | RepoError::RevisionNotFound { .. }
        )
    }
}

impl From<zip::result::ZipError> for RepoError {
    fn from(e: zip::result::ZipError) -> Self {
        RepoError::Archive {
            message: e.to_string(),
        }
    }
}

impl From<walkdir::Error> for RepoError {
    fn from(e: walkdir::Error) -> Self {
        RepoError::Io(std::io::Error::other(e.to_string()))
    }
}

impl From<tempfile::PersistError> for RepoError {
    fn from(e: tempfile::PersistError) -> Self {
        RepoError::Io(e.error)
    }
}
