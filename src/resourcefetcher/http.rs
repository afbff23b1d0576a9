//! HTTP(S) resource fetcher

use super::{FetchError, ResourceFetcher};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent for fetch requests
const USER_AGENT: &str = concat!("cloud-toolkit/", env!("CARGO_PKG_VERSION"));

/// Downloads a document from a URL
pub struct HttpResourceFetcher {
    /// HTTP client with configured timeout and user agent
    http_client: Client,
    url: String,
}

impl HttpResourceFetcher {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(url: impl Into<String>, timeout_secs: u64) -> Result<Self, FetchError> {
        let url = url.into();
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ResourceFetcher for HttpResourceFetcher {
    async fn get(&self) -> Result<String, FetchError> {
        debug!("Fetching {}", self.url);
        let http_error = |source: reqwest::Error| FetchError::Http {
            url: self.url.clone(),
            source,
        };

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(http_error)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
