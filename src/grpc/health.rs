//! `grpc.health.v1.Health` status for `translation.v1.TranslationService`.
//!
//! The service starts as `NOT_SERVING` and follows a periodic database ping
//! until the server shuts down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tonic_health::server::HealthReporter;
use tonic_health::ServingStatus;
use tracing::{debug, error};

use super::proto::SERVICE_NAME;
use crate::db::TranslationStore;

pub const PING_INTERVAL: Duration = Duration::from_secs(5);

/// Ping the store once and publish the result for the translation service.
pub async fn report_database(
    store: &dyn TranslationStore,
    reporter: &mut HealthReporter,
) -> ServingStatus {
    let status = match store.ping().await {
        Ok(()) => {
            debug!("Database is up and running");
            ServingStatus::Serving
        }
        Err(e) => {
            error!(error = %e, "Database is down");
            ServingStatus::NotServing
        }
    };

    reporter.set_service_status(SERVICE_NAME, status).await;
    status
}

/// Re-check the database every `interval`, starting immediately, until
/// `true` is sent on `stop` or its sender is dropped.
pub async fn monitor_database(
    store: Arc<dyn TranslationStore>,
    mut reporter: HealthReporter,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = async { stop.wait_for(|stop| *stop).await.map(|_| ()) } => break,
            _ = ticker.tick() => {
                report_database(store.as_ref(), &mut reporter).await;
            }
        }
    }

    debug!("Database health monitor stopped");
}
