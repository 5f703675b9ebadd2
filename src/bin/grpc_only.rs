//! Serve only the gRPC service, regardless of `TRANSPORT`.

use anyhow::Result;
use tracing::info;
use translation_service::config::{Config, Transport};
use translation_service::{server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config {
        transport: Transport::Grpc,
        ..Config::from_env()?
    };

    tracing::subscriber::set_global_default(telemetry::subscriber(config.environment)?)?;
    info!(address = %config.grpc_addr, "Starting gRPC-only translation service");

    server::run(config).await
}
