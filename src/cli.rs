use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "toolkit-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query cloud partition and region metadata")]
#[command(long_about = "Resolve partitions, regions and service availability from the published endpoints document, and walk through an interactive deployment target wizard.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format where applicable
    #[arg(long, global = true)]
    pub json: bool,

    /// Endpoints document to load instead of the configured one (URL or file path)
    #[arg(long, global = true, value_name = "URL|PATH", env = "TOOLKIT_ENDPOINTS_SOURCE")]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up partitions, regions and services
    Regions {
        #[command(subcommand)]
        command: RegionsCommand,
    },

    /// Choose a deployment target interactively
    Wizard,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RegionsCommand {
    /// List partition ids
    Partitions,

    /// List the regions of a partition
    List {
        #[arg(value_name = "PARTITION")]
        partition: String,
    },

    /// Show the partition containing a region
    PartitionOf {
        #[arg(value_name = "REGION")]
        region: String,
    },

    /// Show the DNS suffix for a region
    DnsSuffix {
        #[arg(value_name = "REGION")]
        region: String,
    },

    /// Check whether a service is available in a region
    HasService {
        #[arg(value_name = "SERVICE")]
        service: String,
        #[arg(value_name = "REGION")]
        region: String,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
