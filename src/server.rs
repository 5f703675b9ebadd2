use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_stream::wrappers::TcpListenerStream;
use tonic_health::ServingStatus;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::{Database, TranslationStore};
use crate::grpc::proto::SERVICE_NAME;
use crate::grpc::{health, TranslationGrpcHandler, TranslationServiceServer};
use crate::http;

/// Serve the HTTP API on `listener` until `shutdown` resolves.
pub async fn serve_http<F>(
    listener: TcpListener,
    store: Arc<dyn TranslationStore>,
    request_timeout: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, http::router(store, request_timeout))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

/// Serve the gRPC service and its `grpc.health.v1.Health` status on
/// `listener` until `shutdown` resolves.
pub async fn serve_grpc<F>(
    listener: TcpListener,
    store: Arc<dyn TranslationStore>,
    request_timeout: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Starting gRPC server");

    let (mut reporter, health_service) = tonic_health::server::health_reporter();
    reporter
        .set_service_status(SERVICE_NAME, ServingStatus::NotServing)
        .await;

    // Dropping `stop_tx` (server exiting on its own) also ends the monitor.
    let (stop_tx, stop_rx) = watch::channel(false);
    let monitor = tokio::spawn(health::monitor_database(
        Arc::clone(&store),
        reporter.clone(),
        health::PING_INTERVAL,
        stop_rx,
    ));

    let shutdown = async move {
        shutdown.await;
        let _ = stop_tx.send(true);
        let _ = monitor.await;
        reporter
            .set_service_status(SERVICE_NAME, ServingStatus::NotServing)
            .await;
    };

    tonic::transport::Server::builder()
        .timeout(request_timeout)
        .add_service(health_service)
        .add_service(TranslationServiceServer::new(TranslationGrpcHandler::new(store)))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
        .context("gRPC server failed")?;

    info!("gRPC server stopped");
    Ok(())
}

/// Resolves once `true` has been sent on the channel (or the sender is gone).
pub async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Run the service: connect to the database, start the configured listeners
/// and block until a shutdown signal, then drain.
pub async fn run(config: Config) -> Result<()> {
    info!(transport = ?config.transport, "Initialize application");

    let database = Database::connect(&config.database)
        .await
        .context("Starting application failed, cannot connect to database")?;

    if config.database.run_migrations {
        database
            .migrate()
            .await
            .context("Failed to apply database migrations")?;
    }

    let store: Arc<dyn TranslationStore> = Arc::new(database.clone());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut servers = JoinSet::new();

    if config.transport.serves_http() {
        let listener = TcpListener::bind(config.http_addr)
            .await
            .with_context(|| format!("Cannot listen on {}", config.http_addr))?;
        servers.spawn(serve_http(
            listener,
            Arc::clone(&store),
            config.request_timeout,
            wait_for_shutdown(shutdown_rx.clone()),
        ));
    }

    if config.transport.serves_grpc() {
        let listener = TcpListener::bind(config.grpc_addr)
            .await
            .with_context(|| format!("Cannot listen on {}", config.grpc_addr))?;
        servers.spawn(serve_grpc(
            listener,
            Arc::clone(&store),
            config.request_timeout,
            wait_for_shutdown(shutdown_rx.clone()),
        ));
    }

    // A listener exiting on its own is fatal; stop the rest.
    let mut failure = None;
    tokio::select! {
        _ = shutdown_signal() => {
            info!("Shutdown signal received, shutting down gracefully...");
        }
        Some(result) = servers.join_next() => {
            failure = Some(match result {
                Ok(Ok(())) => anyhow::anyhow!("A server exited unexpectedly"),
                Ok(Err(e)) => e,
                Err(e) => anyhow::Error::new(e).context("Server task panicked"),
            });
        }
    }

    let _ = shutdown_tx.send(true);

    let drained = tokio::time::timeout(config.shutdown_grace, async {
        while let Some(result) = servers.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Server shutdown failed: {:#}", e),
                Err(e) => error!("Server task panicked: {}", e),
            }
        }
    })
    .await;

    if drained.is_err() {
        warn!(
            grace_secs = config.shutdown_grace.as_secs(),
            "Servers did not stop within the grace period, aborting"
        );
        servers.abort_all();
    }

    database.close().await;
    info!("Servers exited");

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
