//! Serve only the HTTP API, regardless of `TRANSPORT`.

use anyhow::Result;
use tracing::info;
use translation_service::config::{Config, Transport};
use translation_service::{server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config {
        transport: Transport::Http,
        ..Config::from_env()?
    };

    tracing::subscriber::set_global_default(telemetry::subscriber(config.environment)?)?;
    info!(address = %config.http_addr, "Starting HTTP-only translation service");

    server::run(config).await
}
