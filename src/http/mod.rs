//! HTTP/JSON surface.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/v1/translations?locale=`
//! - `GET /api/v1/translations/:key?locale=`

pub mod translations;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info_span;
use uuid::Uuid;

use crate::db::TranslationStore;

pub use translations::TranslationBody;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TranslationStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TranslationStore>) -> Self {
        Self { store }
    }
}

/// `GET /health`
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the router with request tracing, a per-request timeout and
/// permissive CORS. Responses produced outside the handlers (timeouts,
/// unmatched routes) are typed `application/json` too.
pub fn router(store: Arc<dyn TranslationStore>, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/translations", get(translations::list_translations))
        .route("/translations/:key", get(translations::get_translation));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(AppState::new(store))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            info_span!(
                "http_request",
                id = %Uuid::new_v4(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
}
