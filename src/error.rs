//! Top-level error type for the toolkit library and CLI
//!
//! Each subsystem owns its own error enum; they all convert into
//! [`ToolkitError`] so command handlers can use `?` throughout.

use crate::regions::EndpointsError;
use crate::resourcefetcher::FetchError;
use crate::wizard::{FormError, WizardError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Endpoints error: {0}")]
    Endpoints(#[from] EndpointsError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// A CLI lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
