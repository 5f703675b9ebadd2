//! gRPC surface: `translation.v1.TranslationService`.

pub mod health;
pub mod proto;

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::db::{Translation, TranslationStore};
use crate::locale::Locale;
use crate::lookup::{self, LookupError};
use proto::{GetTranslationByKeyAndLocaleRequest, GetTranslationByKeyAndLocaleResponse};

pub use proto::{TranslationServiceClient, TranslationServiceServer};

/// Decode the wire enum. `LOCALE_UNSPECIFIED` and numbers outside the enum
/// are not locales.
pub fn decode_locale(value: i32) -> Option<Locale> {
    match proto::Locale::try_from(value).ok()? {
        proto::Locale::DeDe => Some(Locale::DeDe),
        proto::Locale::EnGb => Some(Locale::EnGb),
        proto::Locale::Unspecified => None,
    }
}

pub fn encode_locale(locale: Locale) -> proto::Locale {
    match locale {
        Locale::DeDe => proto::Locale::DeDe,
        Locale::EnGb => proto::Locale::EnGb,
    }
}

impl From<LookupError> for Status {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::InvalidArgument(reason) => Status::invalid_argument(reason),
            LookupError::NotFound => Status::not_found("translation not found"),
            LookupError::Storage(_) => Status::internal("failed to get translation"),
        }
    }
}

impl From<Translation> for proto::Translation {
    fn from(translation: Translation) -> Self {
        Self {
            language_key: translation.language_key,
            translation: translation.translation,
            locale: encode_locale(translation.locale) as i32,
        }
    }
}

pub struct TranslationGrpcHandler {
    store: Arc<dyn TranslationStore>,
}

impl TranslationGrpcHandler {
    pub fn new(store: Arc<dyn TranslationStore>) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl proto::TranslationService for TranslationGrpcHandler {
    async fn get_translation_by_key_and_locale(
        &self,
        request: Request<GetTranslationByKeyAndLocaleRequest>,
    ) -> Result<Response<GetTranslationByKeyAndLocaleResponse>, Status> {
        let request = request.into_inner();
        let span = info_span!(
            "grpc_request",
            id = %Uuid::new_v4(),
            method = "GetTranslationByKeyAndLocale",
        );

        async move {
            tracing::debug!(key = %request.language_key, locale = request.locale, "Incoming request");

            let locale = decode_locale(request.locale);
            let translation =
                lookup::translation_by_key(self.store.as_ref(), &request.language_key, locale)
                    .await?;

            Ok::<_, Status>(Response::new(GetTranslationByKeyAndLocaleResponse {
                translation: Some(translation.into()),
            }))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Locale Codec Tests ====================

    #[test]
    fn test_decode_supported() {
        assert_eq!(decode_locale(proto::Locale::DeDe as i32), Some(Locale::DeDe));
        assert_eq!(decode_locale(proto::Locale::EnGb as i32), Some(Locale::EnGb));
    }

    #[test]
    fn test_decode_unspecified_and_unknown() {
        assert_eq!(decode_locale(proto::Locale::Unspecified as i32), None);
        assert_eq!(decode_locale(3), None);
        assert_eq!(decode_locale(-1), None);
    }

    #[test]
    fn test_encode_inverts_decode() {
        for locale in Locale::ALL {
            assert_eq!(decode_locale(encode_locale(locale) as i32), Some(locale));
        }
    }

    // ==================== Status Mapping Tests ====================

    #[test]
    fn test_status_codes() {
        let status: Status = LookupError::InvalidArgument("language key is required").into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "language key is required");

        let status: Status = LookupError::NotFound.into();
        assert_eq!(status.code(), tonic::Code::NotFound);

        let status: Status = LookupError::Storage(sqlx::Error::PoolTimedOut).into();
        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[test]
    fn test_internal_status_hides_cause() {
        let cause = sqlx::Error::Protocol("relation \"translation\" does not exist".to_string());
        let status: Status = LookupError::Storage(cause).into();
        assert!(!status.message().contains("relation"));
    }

    #[test]
    fn test_translation_conversion() {
        let now = chrono::Utc::now();
        let message: proto::Translation = Translation {
            id: 9,
            language_key: "greeting".to_string(),
            locale: Locale::DeDe,
            translation: "Hallo".to_string(),
            created_at: now,
            updated_at: now,
        }
        .into();

        assert_eq!(message.language_key, "greeting");
        assert_eq!(message.translation, "Hallo");
        assert_eq!(message.locale(), proto::Locale::DeDe);
    }
}
