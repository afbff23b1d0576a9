// Handler modules
pub mod regions;
pub mod wizard;

pub use regions::{handle_regions, load_region_provider};
pub use wizard::{DeploymentTarget, InstanceSettings, deployment_wizard, handle_wizard};
