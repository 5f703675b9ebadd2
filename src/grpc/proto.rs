//! Wire types and service plumbing for `translation.v1.TranslationService`.
//!
//! The schema lives in `proto/translation/v1/translation.proto`. The message
//! types below carry the same field numbers and are declared with `prost`
//! derives, so no protoc is needed at build time. The server and client
//! wrappers follow the shape tonic's generator produces.

use std::sync::Arc;
use std::task::{Context, Poll};

use tonic::codegen::{http, Body, BoxFuture, Bytes, Service, StdError};

/// Fully-qualified service name.
pub const SERVICE_NAME: &str = "translation.v1.TranslationService";

const GET_TRANSLATION_BY_KEY_AND_LOCALE: &str =
    "/translation.v1.TranslationService/GetTranslationByKeyAndLocale";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Locale {
    Unspecified = 0,
    DeDe = 1,
    EnGb = 2,
}

impl Locale {
    /// Enum value name as written in the `.proto` file.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Locale::Unspecified => "LOCALE_UNSPECIFIED",
            Locale::DeDe => "LOCALE_DE_DE",
            Locale::EnGb => "LOCALE_EN_GB",
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Translation {
    #[prost(string, tag = "1")]
    pub language_key: String,
    #[prost(string, tag = "2")]
    pub translation: String,
    #[prost(enumeration = "Locale", tag = "3")]
    pub locale: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetTranslationByKeyAndLocaleRequest {
    #[prost(string, tag = "1")]
    pub language_key: String,
    #[prost(enumeration = "Locale", tag = "2")]
    pub locale: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetTranslationByKeyAndLocaleResponse {
    #[prost(message, optional, tag = "1")]
    pub translation: Option<Translation>,
}

// ============================================================================
// Server
// ============================================================================

#[tonic::async_trait]
pub trait TranslationService: Send + Sync + 'static {
    async fn get_translation_by_key_and_locale(
        &self,
        request: tonic::Request<GetTranslationByKeyAndLocaleRequest>,
    ) -> Result<tonic::Response<GetTranslationByKeyAndLocaleResponse>, tonic::Status>;
}

/// Routes gRPC requests to a `TranslationService` implementation.
#[derive(Debug)]
pub struct TranslationServiceServer<T> {
    inner: Arc<T>,
}

impl<T> TranslationServiceServer<T> {
    pub fn new(inner: T) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T> Clone for TranslationServiceServer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> tonic::server::NamedService for TranslationServiceServer<T> {
    const NAME: &'static str = SERVICE_NAME;
}

struct GetTranslationByKeyAndLocaleSvc<T>(Arc<T>);

impl<T: TranslationService> tonic::server::UnaryService<GetTranslationByKeyAndLocaleRequest>
    for GetTranslationByKeyAndLocaleSvc<T>
{
    type Response = GetTranslationByKeyAndLocaleResponse;
    type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

    fn call(
        &mut self,
        request: tonic::Request<GetTranslationByKeyAndLocaleRequest>,
    ) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { inner.get_translation_by_key_and_locale(request).await })
    }
}

impl<T, B> Service<http::Request<B>> for TranslationServiceServer<T>
where
    T: TranslationService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        match req.uri().path() {
            GET_TRANSLATION_BY_KEY_AND_LOCALE => {
                let inner = Arc::clone(&self.inner);
                Box::pin(async move {
                    let method = GetTranslationByKeyAndLocaleSvc(inner);
                    let codec = tonic::codec::ProstCodec::default();
                    let mut grpc = tonic::server::Grpc::new(codec);
                    Ok(grpc.unary(method, req).await)
                })
            }
            _ => Box::pin(async move {
                let mut response = http::Response::new(tonic::codegen::empty_body());
                let headers = response.headers_mut();
                headers.insert(
                    http::HeaderName::from_static("grpc-status"),
                    http::HeaderValue::from(tonic::Code::Unimplemented as i32),
                );
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                Ok(response)
            }),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct TranslationServiceClient<T> {
    inner: tonic::client::Grpc<T>,
}

impl TranslationServiceClient<tonic::transport::Channel> {
    /// Connect to a server, e.g. `"http://127.0.0.1:50051"`.
    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
        D: TryInto<tonic::transport::Endpoint>,
        D::Error: Into<StdError>,
    {
        let channel = tonic::transport::Endpoint::new(dst)?.connect().await?;
        Ok(Self::new(channel))
    }
}

impl<T> TranslationServiceClient<T>
where
    T: tonic::client::GrpcService<tonic::body::BoxBody>,
    T::Error: Into<StdError>,
    T::ResponseBody: Body<Data = Bytes> + Send + 'static,
    <T::ResponseBody as Body>::Error: Into<StdError> + Send,
{
    pub fn new(inner: T) -> Self {
        Self {
            inner: tonic::client::Grpc::new(inner),
        }
    }

    pub async fn get_translation_by_key_and_locale(
        &mut self,
        request: impl tonic::IntoRequest<GetTranslationByKeyAndLocaleRequest>,
    ) -> Result<tonic::Response<GetTranslationByKeyAndLocaleResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(GET_TRANSLATION_BY_KEY_AND_LOCALE);
        self.inner.unary(request.into_request(), path, codec).await
    }
}
