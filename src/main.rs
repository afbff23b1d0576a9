use clap::Parser;
use cloud_toolkit::{cli::Cli, config, run_command};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> cloud_toolkit::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(env::current_dir().ok().as_deref()),
    };

    run_command(cli.command, &config, cli.source.as_deref(), cli.json).await
}
