use crate::{
    cli::RegionsCommand,
    config::types::EndpointsConfig,
    error::{Result, ToolkitError},
    regions::{DefaultRegionProvider, EndpointsProvider, RegionProvider},
    resourcefetcher::{FileResourceFetcher, fetcher_for},
};
use colored::Colorize;
use log::debug;
use std::sync::Arc;

/// Load the endpoints document and wrap it in a region provider.
///
/// `source` overrides the configured location; the configured fallback file is
/// only consulted for the configured location.
pub async fn load_region_provider(
    config: &EndpointsConfig,
    source: Option<&str>,
) -> Result<DefaultRegionProvider> {
    let location = source.unwrap_or(config.url.as_str());
    let primary = fetcher_for(location, config.timeout_secs)?;

    let provider = match (&config.fallback_path, source) {
        (Some(fallback), None) => EndpointsProvider::new(
            primary,
            Arc::new(FileResourceFetcher::new(fallback.clone())),
        ),
        _ => EndpointsProvider::from_fetcher(primary),
    };
    debug!("Loading endpoints from {}", location);
    provider.load().await?;

    Ok(DefaultRegionProvider::new(Arc::new(provider)))
}

pub async fn handle_regions(
    command: RegionsCommand,
    config: &EndpointsConfig,
    source: Option<&str>,
    json: bool,
) -> Result<()> {
    let provider = load_region_provider(config, source).await?;
    let output = render_regions(&command, &provider, json)?;
    println!("{}", output);
    Ok(())
}

/// Answer one regions command against a loaded provider
pub fn render_regions(
    command: &RegionsCommand,
    provider: &dyn RegionProvider,
    json: bool,
) -> Result<String> {
    match command {
        RegionsCommand::Partitions => {
            let ids = provider.get_partition_ids();
            if json {
                Ok(serde_json::to_string_pretty(&ids)?)
            } else {
                Ok(ids.join("\n"))
            }
        }
        RegionsCommand::List { partition } => {
            let regions = provider.get_regions(partition);
            if regions.is_empty() {
                return Err(ToolkitError::NotFound(format!("partition '{}'", partition)));
            }
            if json {
                return Ok(serde_json::to_string_pretty(&regions)?);
            }
            let width = regions.iter().map(|r| r.id.len()).max().unwrap_or(0);
            Ok(regions
                .iter()
                .map(|region| {
                    format!(
                        "{}  {}",
                        format!("{:<width$}", region.id, width = width).bright_cyan(),
                        region.name.dimmed()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        RegionsCommand::PartitionOf { region } => {
            let partition = provider
                .get_partition_id(region)
                .ok_or_else(|| ToolkitError::NotFound(format!("region '{}'", region)))?;
            lookup_output(json, "partition", region, partition)
        }
        RegionsCommand::DnsSuffix { region } => {
            let suffix = provider
                .get_dns_suffix_for_region(region)
                .ok_or_else(|| ToolkitError::NotFound(format!("region '{}'", region)))?;
            lookup_output(json, "dnsSuffix", region, suffix)
        }
        RegionsCommand::HasService { service, region } => {
            let available = provider.is_service_in_region(service, region);
            if json {
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "service": service,
                    "region": region,
                    "available": available,
                }))?)
            } else {
                Ok(available.to_string())
            }
        }
    }
}

fn lookup_output(json: bool, key: &str, region: &str, value: String) -> Result<String> {
    if json {
        let mut object = serde_json::Map::new();
        object.insert("region".to_string(), region.into());
        object.insert(key.to_string(), value.into());
        Ok(serde_json::to_string_pretty(&object)?)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{Endpoints, StaticEndpoints};
    use std::fs;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "partitions": [
            {
                "partition": "aws",
                "partitionName": "Standard",
                "dnsSuffix": "amazonaws.com",
                "regions": {
                    "us-east-1": { "description": "US East (N. Virginia)" },
                    "eu-west-1": { "description": "Europe (Ireland)" }
                },
                "services": { "s3": { "endpoints": { "eu-west-1": {} } } }
            }
        ]
    }"#;

    fn provider() -> DefaultRegionProvider {
        let endpoints = Endpoints::parse(DOCUMENT).unwrap();
        DefaultRegionProvider::new(Arc::new(StaticEndpoints::new(endpoints)))
    }

    #[test]
    fn test_lookups_render_plain_values() {
        let provider = provider();

        let partition = RegionsCommand::PartitionOf {
            region: "eu-west-1".to_string(),
        };
        assert_eq!(render_regions(&partition, &provider, false).unwrap(), "aws");

        let suffix = RegionsCommand::DnsSuffix {
            region: "us-east-1".to_string(),
        };
        assert_eq!(
            render_regions(&suffix, &provider, false).unwrap(),
            "amazonaws.com"
        );

        let has_service = RegionsCommand::HasService {
            service: "s3".to_string(),
            region: "us-east-1".to_string(),
        };
        assert_eq!(render_regions(&has_service, &provider, false).unwrap(), "false");
    }

    #[test]
    fn test_json_output() {
        let provider = provider();
        let list = RegionsCommand::List {
            partition: "aws".to_string(),
        };
        let output = render_regions(&list, &provider, true).unwrap();
        let regions: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(regions[0]["id"], "us-east-1");
        assert_eq!(regions[1]["name"], "Europe (Ireland)");

        let suffix = RegionsCommand::DnsSuffix {
            region: "eu-west-1".to_string(),
        };
        let output = render_regions(&suffix, &provider, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["dnsSuffix"], "amazonaws.com");
        assert_eq!(value["region"], "eu-west-1");
    }

    #[test]
    fn test_unknown_ids_not_found() {
        let provider = provider();
        let partition = RegionsCommand::PartitionOf {
            region: "mars-1".to_string(),
        };
        assert!(matches!(
            render_regions(&partition, &provider, false),
            Err(ToolkitError::NotFound(_))
        ));

        let list = RegionsCommand::List {
            partition: "aws-cn".to_string(),
        };
        assert!(matches!(
            render_regions(&list, &provider, false),
            Err(ToolkitError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_configured_fallback_used() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("endpoints.json");
        fs::write(&fallback, DOCUMENT).unwrap();

        let config = EndpointsConfig {
            url: dir.path().join("missing.json").display().to_string(),
            fallback_path: Some(fallback),
            timeout_secs: 1,
        };
        let provider = load_region_provider(&config, None).await.unwrap();
        assert_eq!(provider.get_partition_ids(), ["aws"]);
    }

    #[tokio::test]
    async fn test_source_override_skips_fallback() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("endpoints.json");
        fs::write(&fallback, DOCUMENT).unwrap();

        let config = EndpointsConfig {
            url: fallback.display().to_string(),
            fallback_path: Some(fallback.clone()),
            timeout_secs: 1,
        };
        let missing = dir.path().join("missing.json").display().to_string();
        let result = load_region_provider(&config, Some(&missing)).await;
        assert!(matches!(result, Err(ToolkitError::Endpoints(_))));
    }
}
