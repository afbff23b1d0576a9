//! Partition, region and service topology
//!
//! The wire document keys regions and services by id:
//!
//! ```json
//! { "partitions": [ { "partition": "aws", "partitionName": "Standard",
//!     "dnsSuffix": "amazonaws.com",
//!     "regions": { "us-east-1": { "description": "US East (N. Virginia)" } },
//!     "services": { "s3": { "endpoints": { "us-east-1": {} } } } } ] }
//! ```
//!
//! It is normalized into ordered lists, keeping the document's key order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All partitions of the loaded document, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Endpoints {
    pub partitions: Vec<Partition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub id: String,
    pub name: String,
    pub dns_suffix: String,
    pub regions: Vec<Region>,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: String,
    pub endpoints: Vec<ServiceEndpoint>,
}

/// A service's presence in one region, with the document's raw endpoint data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
    pub region_id: String,
    pub data: Value,
}

impl Endpoints {
    /// Parse the raw endpoints document
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let document: EndpointsDocument = serde_json::from_str(text)?;
        Ok(document.into())
    }

    pub fn partition(&self, partition_id: &str) -> Option<&Partition> {
        self.partitions
            .iter()
            .find(|partition| partition.id == partition_id)
    }

    /// First partition declaring a region with this id
    pub fn partition_for_region(&self, region_id: &str) -> Option<&Partition> {
        self.partitions
            .iter()
            .find(|partition| partition.region(region_id).is_some())
    }
}

impl Partition {
    pub fn region(&self, region_id: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == region_id)
    }

    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == service_id)
    }
}

impl Service {
    pub fn is_in_region(&self, region_id: &str) -> bool {
        self.endpoints
            .iter()
            .any(|endpoint| endpoint.region_id == region_id)
    }
}

#[derive(Debug, Deserialize)]
struct EndpointsDocument {
    partitions: Vec<PartitionDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitionDocument {
    partition: String,
    #[serde(default)]
    partition_name: String,
    dns_suffix: String,
    #[serde(default)]
    regions: IndexMap<String, RegionDocument>,
    #[serde(default)]
    services: IndexMap<String, ServiceDocument>,
}

#[derive(Debug, Deserialize)]
struct RegionDocument {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ServiceDocument {
    #[serde(default)]
    endpoints: IndexMap<String, Value>,
}

impl From<EndpointsDocument> for Endpoints {
    fn from(document: EndpointsDocument) -> Self {
        Self {
            partitions: document.partitions.into_iter().map(Partition::from).collect(),
        }
    }
}

impl From<PartitionDocument> for Partition {
    fn from(document: PartitionDocument) -> Self {
        Self {
            id: document.partition,
            name: document.partition_name,
            dns_suffix: document.dns_suffix,
            regions: document
                .regions
                .into_iter()
                .map(|(id, region)| Region {
                    id,
                    name: region.description,
                })
                .collect(),
            services: document
                .services
                .into_iter()
                .map(|(id, service)| Service {
                    id,
                    endpoints: service
                        .endpoints
                        .into_iter()
                        .map(|(region_id, data)| ServiceEndpoint { region_id, data })
                        .collect(),
                })
                .collect(),
        }
    }
}
