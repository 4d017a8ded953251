use clap::Parser;

use casebrief_cli::{
    commands::{self, Cli},
    config::Config,
    logging::init_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config.logging);

    tracing::debug!(
        service_configured = config.openrouter_api_key.is_some(),
        model = %config.generation_config().model,
        "Configuration loaded"
    );

    commands::run(cli, &config).await
}
