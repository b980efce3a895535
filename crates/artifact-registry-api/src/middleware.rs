//! HTTP layers wrapped around the listing routes
//!
//! Every request gets an `x-request-id` (generated unless the caller sent
//! one), a tracing span keyed by that id, optional response compression and
//! a read-only CORS policy.

use axum::http::{header, HeaderName, HeaderValue, Method, Request};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    request_id::RequestId,
    trace::{DefaultOnResponse, MakeSpan, TraceLayer},
    LatencyUnit,
};
use tracing::{info_span, warn, Level, Span};

/// Header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span factory that tags each request span with its request id
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdSpan;

impl<B> MakeSpan<B> for RequestIdSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("-");

        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// Request tracing layer
///
/// Must sit inside `SetRequestIdLayer` so the id is already on the request.
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestIdSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestIdSpan)
        .on_response(
            DefaultOnResponse::new()
                .latency_unit(LatencyUnit::Millis)
                .level(Level::INFO),
        )
}

/// Cross-origin policy for the read-only API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    pub allowed_origins: Vec<String>,

    /// Honoured only together with an explicit origin list
    pub allow_credentials: bool,

    /// Preflight cache lifetime
    pub max_age_seconds: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age_seconds: Some(3600),
        }
    }
}

impl CorsConfig {
    /// Build the CORS layer; only `GET` and `OPTIONS` are allowed
    pub fn into_layer(self) -> CorsLayer {
        let mut layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .expose_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
            .allow_credentials(self.allow_credentials && !self.allowed_origins.is_empty());

        if self.allowed_origins.is_empty() {
            layer = layer.allow_origin(Any).allow_headers(Any);
        } else {
            let origins: Vec<HeaderValue> = self
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer = layer
                .allow_origin(origins)
                .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);
        }

        match self.max_age_seconds {
            Some(secs) => layer.max_age(Duration::from_secs(secs)),
            None => layer,
        }
    }
}

/// Which optional layers wrap the router
///
/// Deserializes from the server's `[http]` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// CORS policy
    pub cors: CorsConfig,

    /// Gzip/brotli/deflate/zstd response bodies when the client accepts them
    pub compression: bool,

    /// Emit one span and one response event per request
    pub request_tracing: bool,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            cors: CorsConfig::default(),
            compression: true,
            request_tracing: true,
        }
    }
}
