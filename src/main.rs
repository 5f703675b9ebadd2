use anyhow::Result;
use tracing::info;
use translation_service::{config, server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the deployment)
    let _ = dotenvy::dotenv();

    let config = config::Config::from_env()?;

    tracing::subscriber::set_global_default(telemetry::subscriber(config.environment)?)?;
    info!(
        log_level = telemetry::default_level(config.environment),
        "Logging initialized"
    );

    server::run(config).await
}
