//! Picture storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing captured pictures to disk.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("failed to prepare pictures directory {path}: {source}")]
    PrepareDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write picture {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StorageError {
    /// Creates a directory-preparation error.
    #[must_use]
    pub fn prepare_directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PrepareDirectory {
            path: path.into(),
            source,
        }
    }

    /// Creates a write error.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
