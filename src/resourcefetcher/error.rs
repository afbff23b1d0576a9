//! Error types for resource fetching

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when retrieving a raw document
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Local file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not available for another reason
    #[error("Resource unavailable: {0}")]
    Unavailable(String),
}
