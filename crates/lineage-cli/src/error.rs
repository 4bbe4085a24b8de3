//! Error types for lineage-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for lineage-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lineage-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from lineage-client
    #[error("Client error: {0}")]
    Client(#[from] lineage_client::Error),

    /// Configuration problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
    },

    /// Filesystem error on a known path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
