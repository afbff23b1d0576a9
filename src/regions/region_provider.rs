//! Read-only queries over the current endpoints snapshot
//!
//! Queries never fail: when nothing is loaded, or the id is unknown, they
//! return `None`, an empty list or `false`.

use super::endpoints::{Endpoints, Region};
use super::endpoints_provider::EndpointsSource;
use std::sync::Arc;

/// Region and partition lookups
pub trait RegionProvider: Send + Sync {
    /// Whether the service declares an endpoint in the region
    fn is_service_in_region(&self, service_id: &str, region_id: &str) -> bool;

    /// DNS suffix of the partition containing the region
    fn get_dns_suffix_for_region(&self, region_id: &str) -> Option<String>;

    /// Id of the partition containing the region
    fn get_partition_id(&self, region_id: &str) -> Option<String>;

    /// Regions of a partition in document order
    fn get_regions(&self, partition_id: &str) -> Vec<Region>;

    /// The region with this id, from whichever partition declares it
    fn get_region(&self, region_id: &str) -> Option<Region>;

    /// Ids of all partitions in document order
    fn get_partition_ids(&self) -> Vec<String>;
}

/// [`RegionProvider`] backed by an [`EndpointsSource`]
pub struct DefaultRegionProvider {
    source: Arc<dyn EndpointsSource>,
}

impl DefaultRegionProvider {
    pub fn new(source: Arc<dyn EndpointsSource>) -> Self {
        Self { source }
    }

    fn with_endpoints<R>(&self, query: impl FnOnce(&Endpoints) -> R) -> Option<R> {
        self.source.get_endpoints().map(|endpoints| query(&endpoints))
    }
}

impl RegionProvider for DefaultRegionProvider {
    fn is_service_in_region(&self, service_id: &str, region_id: &str) -> bool {
        self.with_endpoints(|endpoints| {
            endpoints.partitions.iter().any(|partition| {
                partition
                    .services
                    .iter()
                    .filter(|service| service.id == service_id)
                    .any(|service| service.is_in_region(region_id))
            })
        })
        .unwrap_or(false)
    }

    fn get_dns_suffix_for_region(&self, region_id: &str) -> Option<String> {
        self.with_endpoints(|endpoints| {
            endpoints
                .partition_for_region(region_id)
                .map(|partition| partition.dns_suffix.clone())
        })
        .flatten()
    }

    fn get_partition_id(&self, region_id: &str) -> Option<String> {
        self.with_endpoints(|endpoints| {
            endpoints
                .partition_for_region(region_id)
                .map(|partition| partition.id.clone())
        })
        .flatten()
    }

    fn get_regions(&self, partition_id: &str) -> Vec<Region> {
        self.with_endpoints(|endpoints| {
            endpoints
                .partition(partition_id)
                .map(|partition| partition.regions.clone())
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn get_region(&self, region_id: &str) -> Option<Region> {
        self.with_endpoints(|endpoints| {
            endpoints
                .partition_for_region(region_id)
                .and_then(|partition| partition.region(region_id))
                .cloned()
        })
        .flatten()
    }

    fn get_partition_ids(&self) -> Vec<String> {
        self.with_endpoints(|endpoints| {
            endpoints
                .partitions
                .iter()
                .map(|partition| partition.id.clone())
                .collect()
        })
        .unwrap_or_default()
    }
}
