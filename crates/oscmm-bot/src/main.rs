//! Quote engine entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Oscillator-inversion market-making quote engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via OSCMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    oscmm_bot::init_logging()?;

    info!("Starting oscmm-bot v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > OSCMM_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("OSCMM_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = oscmm_bot::AppConfig::from_file(&config_path)?;
    info!(?config.mode, instruments = config.instruments.len(), "Configuration loaded");

    let mut app = oscmm_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
