//! Error types for lineage-core.

/// Result type alias for lineage-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lineage-core.
///
/// Resolution itself never fails; these only arise while turning a raw
/// payload into [`PersonRecord`](crate::PersonRecord)s.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The people payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A decoded record is unusable.
    #[error("Invalid record {slug:?}: {message}")]
    InvalidRecord {
        /// Slug of the offending record (may be empty).
        slug: String,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Creates an invalid-record error.
    pub fn invalid_record<S, M>(slug: S, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Error::InvalidRecord {
            slug: slug.into(),
            message: message.into(),
        }
    }
}
