//! CLI entry point.
//!
//! Loads `.env`, initialises logging, validates configuration, then runs
//! the selected command. Launches are I/O bound, so one thread is enough.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use magplay_cli::{Cli, Commands, handlers, service_config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = service_config(&cli.service)?;

    match cli.command.unwrap_or_default() {
        Commands::Serve => handlers::serve::execute(config).await,
        Commands::Check { json } => handlers::check::execute(&config, json).await,
    }
}
