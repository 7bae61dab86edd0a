use anyhow::Result;
use memecoin_monitor::{config::Config, services::ApiService};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🔧 Starting memecoin monitor API...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let api_service = ApiService::new(config)?;
    api_service.start().await?;

    Ok(())
}
