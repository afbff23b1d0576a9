//! Local file resource fetcher

use super::{FetchError, ResourceFetcher};
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

/// Reads a document from disk
#[derive(Debug, Clone)]
pub struct FileResourceFetcher {
    path: PathBuf,
}

impl FileResourceFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResourceFetcher for FileResourceFetcher {
    async fn get(&self) -> Result<String, FetchError> {
        debug!("Reading {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"partitions\": []}}").unwrap();

        let fetcher = FileResourceFetcher::new(file.path());
        assert_eq!(fetcher.get().await.unwrap(), "{\"partitions\": []}");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("endpoints.json");

        let fetcher = FileResourceFetcher::new(&missing);
        match fetcher.get().await {
            Err(FetchError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected an IO error, got {:?}", other),
        }
    }
}
