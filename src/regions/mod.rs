//! Partition and region metadata
//!
//! [`EndpointsProvider`] loads the endpoints document through a
//! [`ResourceFetcher`](crate::resourcefetcher::ResourceFetcher) and caches it;
//! [`DefaultRegionProvider`] answers lookups against the cached snapshot.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloud_toolkit::regions::{DefaultRegionProvider, EndpointsProvider, RegionProvider};
//! use cloud_toolkit::resourcefetcher::{FileResourceFetcher, HttpResourceFetcher};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(EndpointsProvider::new(
//!     Arc::new(HttpResourceFetcher::new(DEFAULT_ENDPOINTS_URL)?),
//!     Arc::new(FileResourceFetcher::new("resources/endpoints.json")),
//! ));
//! provider.load().await?;
//!
//! let regions = DefaultRegionProvider::new(provider);
//! assert_eq!(regions.get_partition_id("us-east-1").as_deref(), Some("aws"));
//! ```

pub mod endpoints;
pub mod endpoints_provider;
pub mod error;
pub mod region_provider;

pub use endpoints::{Endpoints, Partition, Region, Service, ServiceEndpoint};
pub use endpoints_provider::{EndpointsProvider, EndpointsSource, StaticEndpoints};
pub use error::EndpointsError;
pub use region_provider::{DefaultRegionProvider, RegionProvider};

/// Published endpoints document for AWS toolkits
pub const DEFAULT_ENDPOINTS_URL: &str = "https://idetoolkits.amazonwebservices.com/endpoints.json";
