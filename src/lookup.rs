//! The lookup path shared by both transports.
//!
//! Each transport decodes its own locale representation into
//! `Option<Locale>` and hands it here together with the language key. The
//! result is either the stored translation(s) or a `LookupError`, which each
//! transport turns into its own status code.

use tracing::error;

use crate::db::{StoreError, Translation, TranslationStore};
use crate::locale::Locale;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Client-attributable input problem.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("translation not found")]
    NotFound,
    /// The store failed. The cause is logged here and must not be echoed to
    /// the caller.
    #[error("storage failure: {0}")]
    Storage(#[source] sqlx::Error),
}

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => LookupError::NotFound,
            StoreError::Database(cause) => LookupError::Storage(cause),
        }
    }
}

const EMPTY_KEY: &str = "language key is required";
const UNSUPPORTED_LOCALE: &str = "unsupported locale";

/// Look up a single translation.
///
/// Validation order: the key must be non-empty, then the locale must have
/// decoded.
pub async fn translation_by_key(
    store: &dyn TranslationStore,
    key: &str,
    locale: Option<Locale>,
) -> Result<Translation, LookupError> {
    if key.is_empty() {
        return Err(LookupError::InvalidArgument(EMPTY_KEY));
    }
    let locale = locale.ok_or(LookupError::InvalidArgument(UNSUPPORTED_LOCALE))?;

    store
        .find_by_key(key, locale)
        .await
        .map_err(|err| log_storage_failure(err.into(), "find_by_key"))
}

/// List every translation stored for a locale. An empty list is a success.
pub async fn translations_for_locale(
    store: &dyn TranslationStore,
    locale: Option<Locale>,
) -> Result<Vec<Translation>, LookupError> {
    let locale = locale.ok_or(LookupError::InvalidArgument(UNSUPPORTED_LOCALE))?;

    store
        .find_all(locale)
        .await
        .map_err(|err| log_storage_failure(err.into(), "find_all"))
}

fn log_storage_failure(err: LookupError, operation: &'static str) -> LookupError {
    if let LookupError::Storage(cause) = &err {
        error!(operation, error = %cause, "Translation storage failure");
    }
    err
}
