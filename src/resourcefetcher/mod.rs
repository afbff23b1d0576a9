//! Raw document retrieval
//!
//! A [`ResourceFetcher`] returns the text of one resource. Transports are
//! interchangeable: [`HttpResourceFetcher`] downloads over HTTP(S),
//! [`FileResourceFetcher`] reads a local file.

pub mod error;
pub mod file;
pub mod http;

use async_trait::async_trait;
use std::sync::Arc;

pub use error::FetchError;
pub use file::FileResourceFetcher;
pub use http::HttpResourceFetcher;

/// Source of a raw document
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the full document text
    async fn get(&self) -> Result<String, FetchError>;

    /// Short description of the source for log messages
    fn describe(&self) -> String {
        "resource".to_string()
    }
}

/// Pick a fetcher for `location`: `http://` and `https://` URLs are downloaded,
/// anything else is read from disk
pub fn fetcher_for(
    location: &str,
    timeout_secs: u64,
) -> Result<Arc<dyn ResourceFetcher>, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpResourceFetcher::with_timeout(
            location,
            timeout_secs,
        )?))
    } else {
        Ok(Arc::new(FileResourceFetcher::new(location)))
    }
}
