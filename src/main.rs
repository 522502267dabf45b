//! API server entry point.
//!
//! ```text
//! CLI args → config (file, APP_ENV/PORT, flags) → logging → startup
//! ```

use std::path::PathBuf;

use clap::Parser;

use api_pipeline::config::{self, Environment};
use api_pipeline::observability::{init_logging, log_startup};
use api_pipeline::{lifecycle, routes};

#[derive(Parser)]
#[command(name = "api-pipeline")]
#[command(about = "JSON API server with a uniform error pipeline", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Running mode (development, production, test). Overrides APP_ENV.
    #[arg(short, long)]
    env: Option<Environment>,

    /// Listener port. Overrides PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_from_env(cli.config.as_deref())?;
    if let Some(environment) = cli.env {
        config.environment = environment;
    }
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    init_logging(&config)?;

    log_startup(&config, cli.config.as_deref());

    lifecycle::start(config, routes::api_router()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
