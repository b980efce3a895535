//! Artifact Registry API Layer
//!
//! This crate provides the read-only REST API for artifact listings using Axum.
//! It includes request handlers, middleware, error handling, and health responses.
//!
//! # Example
//!
//! ```rust,no_run
//! use artifact_registry_api::build_api_server;
//! use artifact_registry_service::{
//!     DefaultArtifactListingService, InMemoryArtifactCatalog, PaginationConfig,
//! };
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(InMemoryArtifactCatalog::new());
//! let listing = Arc::new(DefaultArtifactListingService::new(
//!     catalog,
//!     PaginationConfig::default(),
//! ));
//!
//! let app = build_api_server(listing);
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routes;

// Re-export main types for convenience
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{AppState, ListArtifactsParams, ListLabelsParams};
pub use middleware::{CorsConfig, MiddlewareConfig, RequestIdSpan, REQUEST_ID_HEADER};
pub use responses::{ComponentHealth, HealthResponse, HealthStatus};
pub use routes::build_router;

use artifact_registry_service::ArtifactListingService;
use axum::Router;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
};

/// Build a complete API server with default middleware
pub fn build_api_server(listing: Arc<dyn ArtifactListingService>) -> Router {
    build_api_server_with_config(listing, MiddlewareConfig::default())
}

/// Build API server with custom middleware configuration
///
/// # Example
///
/// ```rust,no_run
/// use artifact_registry_api::{build_api_server_with_config, CorsConfig, MiddlewareConfig};
/// use artifact_registry_service::ArtifactListingService;
/// use std::sync::Arc;
///
/// # fn example(listing: Arc<dyn ArtifactListingService>) {
/// let middleware_config = MiddlewareConfig {
///     cors: CorsConfig::default(),
///     compression: false,
///     request_tracing: true,
/// };
///
/// let app = build_api_server_with_config(listing, middleware_config);
/// # }
/// ```
pub fn build_api_server_with_config(
    listing: Arc<dyn ArtifactListingService>,
    middleware_config: MiddlewareConfig,
) -> Router {
    let mut router = build_router(AppState::new(listing));

    router = router.layer(middleware_config.cors.into_layer());

    if middleware_config.compression {
        router = router.layer(CompressionLayer::new());
    }

    if middleware_config.request_tracing {
        router = router.layer(middleware::trace_layer());
    }

    // Request IDs are set outermost so the trace span can see them.
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
