use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use crate::db::Translation;
use crate::locale::Locale;
use crate::lookup::{self, LookupError};

/// `?locale=` query parameter. Kept as a raw string so a missing or
/// unsupported value produces our own 400 rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    locale: Option<String>,
}

impl LocaleQuery {
    fn decode(&self) -> Option<Locale> {
        self.locale.as_deref().and_then(Locale::from_token)
    }
}

/// Locale from the query string. A query that does not deserialize (a
/// repeated `locale`, say) counts as no locale.
fn requested_locale(query: Result<Query<LocaleQuery>, QueryRejection>) -> Option<Locale> {
    match query {
        Ok(Query(query)) => query.decode(),
        Err(rejection) => {
            debug!(%rejection, "Rejected query string");
            None
        }
    }
}

/// JSON representation of a translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBody {
    pub id: i64,
    pub language_key: String,
    pub locale: String,
    pub translation: String,
}

impl From<Translation> for TranslationBody {
    fn from(translation: Translation) -> Self {
        Self {
            id: translation.id,
            language_key: translation.language_key,
            locale: translation.locale.as_str().to_string(),
            translation: translation.translation,
        }
    }
}

/// Error response: status code, JSON content type, empty body.
#[derive(Debug)]
pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            LookupError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            LookupError::NotFound => StatusCode::NOT_FOUND,
            LookupError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "application/json")],
        )
            .into_response()
    }
}

/// `GET /api/v1/translations/:key?locale=`
pub async fn get_translation(
    State(state): State<AppState>,
    Path(key): Path<String>,
    query: Result<Query<LocaleQuery>, QueryRejection>,
) -> Result<Json<TranslationBody>, ApiError> {
    let translation =
        lookup::translation_by_key(state.store.as_ref(), &key, requested_locale(query)).await?;
    Ok(Json(translation.into()))
}

/// `GET /api/v1/translations?locale=`
pub async fn list_translations(
    State(state): State<AppState>,
    query: Result<Query<LocaleQuery>, QueryRejection>,
) -> Result<Json<Vec<TranslationBody>>, ApiError> {
    let translations =
        lookup::translations_for_locale(state.store.as_ref(), requested_locale(query)).await?;
    Ok(Json(translations.into_iter().map(Into::into).collect()))
}
