//! Translation lookup service.
//!
//! Serves stored translations, keyed by language key and locale, over gRPC
//! (`translation.v1.TranslationService`) and an HTTP/JSON API (`/api/v1`).
//! Both transports share the lookup path in [`lookup`] and read through a
//! [`db::TranslationStore`].

pub mod config;
pub mod db;
pub mod grpc;
pub mod http;
pub mod locale;
pub mod lookup;
pub mod server;
pub mod telemetry;

pub use db::{Database, StoreError, Translation, TranslationStore};
pub use locale::Locale;
pub use lookup::LookupError;
