use crate::regions::DEFAULT_ENDPOINTS_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointsConfig,
    pub wizard: WizardConfig,
}

/// Where the endpoints document is loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Primary source, an http(s) URL or a file path
    pub url: String,
    /// Local copy used when the primary source fails
    pub fallback_path: Option<PathBuf>,
    /// Request timeout for http sources
    pub timeout_secs: u64,
}

/// Terminal wizard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Items shown per page in pickers
    pub page_size: usize,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINTS_URL.to_string(),
            fallback_path: None,
            timeout_secs: 30,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self { page_size: 7 }
    }
}
