use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Filesystem error on the backing document
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write refused by the storage backend
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl RepositoryError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}
