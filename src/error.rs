//! Error types for the vidmeta pipeline.
//!
//! Only configuration and serialization errors end a run. Per-file problems
//! are recorded as failure rows and traversal problems are logged where
//! they happen.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a scan or merge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid roots, settings or a missing probing tool. Raised before any
    /// walking begins.
    #[error("configuration error: {0}")]
    Config(String),

    /// The output table could not be written.
    #[error("failed to write table {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input table could not be parsed during a merge.
    #[error("{}:{line}: {message}", path.display())]
    Merge {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// The worker pool could not be started or lost all of its workers.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a serialization error for `path`.
    pub fn serialization(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }
}
