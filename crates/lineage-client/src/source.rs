//! The [`PeopleSource`] seam and a file-backed implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lineage_core::{PersonRecord, decode_people};

use crate::error::{Error, Result};

/// Something that can produce the full, flat collection of people.
///
/// One call yields either every record or an error. There are no partial
/// results and no pagination.
#[async_trait]
pub trait PeopleSource: Send + Sync {
    /// Fetches the current collection.
    async fn fetch_people(&self) -> Result<Vec<PersonRecord>>;

    /// Short description for logs (an URL or a path).
    fn describe(&self) -> String;
}

/// Reads the people payload from a local JSON file.
#[derive(Clone, Debug)]
pub struct FilePeopleSource {
    path: PathBuf,
}

impl FilePeopleSource {
    /// Creates a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The payload file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PeopleSource for FilePeopleSource {
    async fn fetch_people(&self) -> Result<Vec<PersonRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::io_with_path(e, &self.path))?;
        let records = decode_people(&bytes)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Read people file");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_payload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(
            &path,
            r#"[{"name":"Eve","sex":"f","born":1960,"died":0,"slug":"eve"}]"#,
        )
        .unwrap();

        let source = FilePeopleSource::new(&path);
        let records = source.fetch_people().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug, "eve");
        assert_eq!(source.describe(), path.display().to_string());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FilePeopleSource::new("/nonexistent/people.json");
        let err = source.fetch_people().await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_file_source_malformed_payload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(&path, "<html>not json</html>").unwrap();

        let err = FilePeopleSource::new(&path).fetch_people().await.unwrap_err();
        assert!(matches!(err, Error::Core(lineage_core::Error::Decode(_))));
    }
}
