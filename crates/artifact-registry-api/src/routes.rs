//! API route definitions
//!
//! This module defines all API routes and builds the router.

use axum::{routing::get, Router};

use crate::handlers::{
    artifact_summary, health_check, list_artifacts, list_labels, list_registry_artifacts,
    list_registry_labels, version_summary, AppState,
};

/// Build the API router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", build_v1_routes())
        .with_state(state)
}

/// Build v1 API routes
fn build_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/artifacts", get(list_artifacts))
        .route("/registries/{registry}/artifacts", get(list_registry_artifacts))
        .route(
            "/registries/{registry}/artifacts/{artifact}/summary",
            get(artifact_summary),
        )
        .route(
            "/registries/{registry}/artifacts/{artifact}/versions/{version}/summary",
            get(version_summary),
        )
        .route("/registries/{registry}/labels", get(list_registry_labels))
        .route("/labels", get(list_labels))
}
