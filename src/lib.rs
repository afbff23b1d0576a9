//! # Cloud Toolkit
//!
//! Building blocks for interactive cloud tooling.
//!
//! ## Features
//!
//! - **Form wizards**: multi-step forms derived from a serde type, with
//!   back-navigation, conditional fields and defaults
//! - **Prompt backends**: terminal prompts via `inquire`, plus a scripted
//!   backend for driving wizards in tests
//! - **Region metadata**: partitions, regions and service availability from
//!   the published endpoints document, with a local fallback copy
//!
//! ## Example
//!
//! ```rust,no_run
//! use cloud_toolkit::regions::{DefaultRegionProvider, EndpointsProvider, RegionProvider};
//! use cloud_toolkit::resourcefetcher::FileResourceFetcher;
//! use std::sync::Arc;
//!
//! # async fn example() -> cloud_toolkit::Result<()> {
//! let provider = Arc::new(EndpointsProvider::from_fetcher(Arc::new(
//!     FileResourceFetcher::new("endpoints.json"),
//! )));
//! provider.load().await?;
//!
//! let regions = DefaultRegionProvider::new(provider);
//! println!("{:?}", regions.get_dns_suffix_for_region("us-east-1"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod regions;
pub mod resourcefetcher;
pub mod ui;
pub mod wizard;

// Re-export commonly used types
pub use error::{Result, ToolkitError};
pub use regions::{DefaultRegionProvider, EndpointsProvider, RegionProvider};
pub use wizard::{Wizard, WizardStatus};

use cli::Commands;
use config::types::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn run_command(
    command: Commands,
    config: &Config,
    source: Option<&str>,
    json: bool,
) -> Result<()> {
    match command {
        Commands::Regions { command } => {
            handlers::handle_regions(command, &config.endpoints, source, json).await
        }
        Commands::Wizard => handlers::handle_wizard(config, source, json).await,
    }
}
