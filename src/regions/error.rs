//! Error types for loading endpoints

use crate::resourcefetcher::FetchError;
use thiserror::Error;

/// Errors surfaced by [`EndpointsProvider::load`](super::EndpointsProvider::load)
#[derive(Debug, Error)]
pub enum EndpointsError {
    /// The document could not be retrieved
    #[error("Failed to fetch endpoints: {0}")]
    Fetch(#[from] FetchError),

    /// The document is not a well-formed endpoints document
    #[error("Failed to parse endpoints: {0}")]
    Parse(#[from] serde_json::Error),
}
