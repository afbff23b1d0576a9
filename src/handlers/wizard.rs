use crate::{
    config::types::Config,
    error::Result,
    handlers::regions::load_region_provider,
    regions::RegionProvider,
    ui::{DataQuickPickItem, PromptUi, TerminalUi, create_input_box, create_quick_pick},
    wizard::{FormError, FormState, Wizard},
};
use colored::Colorize;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where and how a service gets deployed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTarget {
    pub partition: String,
    pub region: String,
    pub service_name: String,
    pub instance: InstanceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSettings {
    pub count: u32,
    /// Only asked in the commercial partition
    pub public: Option<bool>,
}

const PUBLIC_ENDPOINT_PARTITION: &str = "aws";

/// Build the deployment target wizard over `ui` and `regions`
pub fn deployment_wizard(
    ui: Arc<dyn PromptUi>,
    regions: Arc<dyn RegionProvider>,
) -> std::result::Result<Wizard<DeploymentTarget>, FormError> {
    let mut wizard = Wizard::<DeploymentTarget>::new()?;
    let form = wizard.form_mut();

    {
        let ui = ui.clone();
        let pick_regions = regions.clone();
        let default_regions = regions.clone();
        form.field("partition")?
            .bind_optional_prompter(move |_| {
                let ids = pick_regions.get_partition_ids();
                // A single partition is filled in without asking
                (ids.len() > 1).then(|| {
                    let items = ids
                        .into_iter()
                        .map(|id| DataQuickPickItem::new(id.clone(), id))
                        .collect();
                    create_quick_pick(ui.clone(), items).with_title("Select partition")
                })
            })
            .set_default(move |_| default_regions.get_partition_ids().into_iter().next());
    }

    {
        let ui = ui.clone();
        let regions = regions.clone();
        form.field("region")?.bind_prompter(move |state: &FormState| {
            let partition = state.get_as::<String>("partition").unwrap_or_default();
            let items = regions
                .get_regions(&partition)
                .into_iter()
                .map(|region| {
                    DataQuickPickItem::new(region.id.clone(), region.id)
                        .with_description(region.name)
                })
                .collect();
            create_quick_pick(ui.clone(), items)
                .with_title("Select region")
                .with_placeholder(format!("Regions in {}", partition))
        });
    }

    {
        let ui = ui.clone();
        form.field("serviceName")?.bind_prompter(move |_| {
            create_input_box(ui.clone())
                .with_title("Service name")
                .with_placeholder("my-service")
                .with_validator(|text| {
                    text.trim()
                        .is_empty()
                        .then(|| "Service name cannot be empty".to_string())
                })
        });
    }

    {
        let ui = ui.clone();
        form.field("instance.count")?.bind_prompter(move |_| {
            let items = [1u32, 2, 4]
                .into_iter()
                .map(|count| DataQuickPickItem::new(count.to_string(), count))
                .collect();
            create_quick_pick(ui.clone(), items)
                .with_title("Instance count")
                .set_custom_input(parse_count)
        });
    }

    form.field("instance.public")?
        .bind_prompter(move |_| {
            create_quick_pick(
                ui.clone(),
                vec![
                    DataQuickPickItem::new("Yes", true),
                    DataQuickPickItem::new("No", false),
                ],
            )
            .with_title("Public endpoint")
        })
        .show_when(|state| {
            state.get_as::<String>("partition").as_deref() == Some(PUBLIC_ENDPOINT_PARTITION)
        });

    Ok(wizard)
}

fn parse_count(text: &str) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(count) if count > 0 => count,
        _ => {
            warn!("'{}' is not a positive instance count, using 1", text);
            1
        }
    }
}

pub async fn handle_wizard(config: &Config, source: Option<&str>, json: bool) -> Result<()> {
    let regions = load_region_provider(&config.endpoints, source).await?;
    let ui: Arc<dyn PromptUi> = Arc::new(TerminalUi::new(config.wizard.page_size));
    let mut wizard = deployment_wizard(ui, Arc::new(regions))?;

    match wizard.run().await? {
        Some(target) if json => println!("{}", serde_json::to_string_pretty(&target)?),
        Some(target) => display_target(&target),
        None => println!("Wizard cancelled."),
    }
    Ok(())
}

fn display_target(target: &DeploymentTarget) {
    println!("\n{} Deployment target", "✓".green().bold());
    println!("  {:<10} {}", "Service:".dimmed(), target.service_name.bold());
    println!(
        "  {:<10} {} ({})",
        "Region:".dimmed(),
        target.region.bright_cyan(),
        target.partition
    );
    println!("  {:<10} {}", "Instances:".dimmed(), target.instance.count);
    if let Some(public) = target.instance.public {
        println!(
            "  {:<10} {}",
            "Public:".dimmed(),
            if public { "yes" } else { "no" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{DefaultRegionProvider, Endpoints, StaticEndpoints};
    use crate::ui::{ScriptedUi, WizardCommand};
    use crate::wizard::WizardStatus;

    const DOCUMENT: &str = r#"{
        "partitions": [
            {
                "partition": "aws",
                "dnsSuffix": "amazonaws.com",
                "regions": {
                    "us-east-1": { "description": "US East (N. Virginia)" },
                    "eu-west-1": { "description": "Europe (Ireland)" }
                }
            },
            {
                "partition": "aws-cn",
                "dnsSuffix": "amazonaws.com.cn",
                "regions": { "cn-north-1": { "description": "China (Beijing)" } }
            }
        ]
    }"#;

    const SINGLE_PARTITION: &str = r#"{
        "partitions": [
            {
                "partition": "aws-cn",
                "dnsSuffix": "amazonaws.com.cn",
                "regions": { "cn-north-1": {}, "cn-northwest-1": {} }
            }
        ]
    }"#;

    fn regions(document: &str) -> Arc<dyn RegionProvider> {
        let endpoints = Endpoints::parse(document).unwrap();
        Arc::new(DefaultRegionProvider::new(Arc::new(StaticEndpoints::new(
            endpoints,
        ))))
    }

    #[tokio::test]
    async fn test_commercial_partition_asks_for_public_endpoint() {
        let ui = Arc::new(ScriptedUi::new(vec![
            WizardCommand::quick_pick("aws"),
            WizardCommand::quick_pick("eu-west-1"),
            WizardCommand::input_box("orders"),
            WizardCommand::custom_input("3"),
            WizardCommand::quick_pick("Yes"),
        ]));
        let mut wizard = deployment_wizard(ui.clone(), regions(DOCUMENT)).unwrap();

        let target = wizard.run().await.unwrap().unwrap();
        assert_eq!(
            target,
            DeploymentTarget {
                partition: "aws".to_string(),
                region: "eu-west-1".to_string(),
                service_name: "orders".to_string(),
                instance: InstanceSettings {
                    count: 3,
                    public: Some(true),
                },
            }
        );
        assert_eq!(
            ui.titles(),
            [
                "Select partition",
                "Select region",
                "Service name",
                "Instance count",
                "Public endpoint"
            ]
        );
    }

    #[tokio::test]
    async fn test_other_partition_skips_public_endpoint() {
        let ui = Arc::new(ScriptedUi::new(vec![
            WizardCommand::quick_pick("aws-cn"),
            WizardCommand::quick_pick("cn-north-1"),
            WizardCommand::input_box("orders"),
            WizardCommand::quick_pick("2"),
        ]));
        let mut wizard = deployment_wizard(ui.clone(), regions(DOCUMENT)).unwrap();

        let target = wizard.run().await.unwrap().unwrap();
        assert_eq!(target.instance.count, 2);
        assert_eq!(target.instance.public, None);
        assert_eq!(ui.remaining(), 0);
    }

    #[tokio::test]
    async fn test_single_partition_is_defaulted() {
        let ui = Arc::new(ScriptedUi::new(vec![
            WizardCommand::quick_pick("cn-northwest-1"),
            WizardCommand::input_box("orders"),
            WizardCommand::quick_pick("1"),
        ]));
        let mut wizard = deployment_wizard(ui.clone(), regions(SINGLE_PARTITION)).unwrap();

        let target = wizard.run().await.unwrap().unwrap();
        assert_eq!(target.partition, "aws-cn");
        assert_eq!(target.region, "cn-northwest-1");
        assert_eq!(ui.titles()[0], "Select region");
    }

    #[tokio::test]
    async fn test_empty_service_name_is_reprompted() {
        let ui = Arc::new(ScriptedUi::new(vec![
            WizardCommand::quick_pick("cn-north-1"),
            WizardCommand::input_box("  "),
            WizardCommand::input_box("orders"),
            WizardCommand::quick_pick("4"),
        ]));
        let mut wizard = deployment_wizard(ui.clone(), regions(SINGLE_PARTITION)).unwrap();

        let target = wizard.run().await.unwrap().unwrap();
        assert_eq!(target.service_name, "orders");
        assert_eq!(target.instance.count, 4);
        assert_eq!(ui.titles()[1..3], ["Service name", "Service name"]);
    }

    #[tokio::test]
    async fn test_cancel_first_prompt() {
        let ui = Arc::new(ScriptedUi::new(vec![WizardCommand::Cancel]));
        let mut wizard = deployment_wizard(ui, regions(DOCUMENT)).unwrap();

        assert_eq!(wizard.run().await.unwrap(), None);
        assert_eq!(wizard.status(), WizardStatus::Cancelled);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("many"), 1);
    }
}
