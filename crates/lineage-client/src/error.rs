//! Error types for lineage-client.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for lineage-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching people.
///
/// The presentation layer collapses all of these into one generic failure
/// state; the variants exist for logging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Payload could not be decoded.
    #[error("Core error: {0}")]
    Core(#[from] lineage_core::Error),

    /// HTTP client error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Endpoint {url} returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Local payload file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong.
        message: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
