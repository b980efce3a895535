//! API request handlers
//!
//! This module implements HTTP request handlers for all API endpoints.

use artifact_registry_core::PackageType;
use artifact_registry_service::{
    ArtifactFilter, ArtifactListingService, ArtifactVersionSummary, ImageSummary, LabelFilter,
    ListArtifactLabel, PageRequest, PagedArtifactResponse, ResponseEnvelope,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    error::ApiResult,
    responses::{ComponentHealth, HealthResponse},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Listing service
    pub listing: Arc<dyn ArtifactListingService>,
}

impl AppState {
    /// Create new application state
    pub fn new(listing: Arc<dyn ArtifactListingService>) -> Self {
        Self { listing }
    }
}

/// Query parameters for artifact listings
#[derive(Debug, Default, Deserialize)]
pub struct ListArtifactsParams {
    /// 1-based page index
    pub page: Option<i64>,

    /// Page size
    pub size: Option<i32>,

    /// Case-insensitive substring of the artifact name
    pub search_term: Option<String>,

    /// Comma-separated package types
    pub package_type: Option<String>,

    /// Comma-separated labels, all of which must be present
    pub label: Option<String>,
}

impl ListArtifactsParams {
    /// Split into a filter and a page request
    pub fn into_filter(
        self,
        registry: Option<String>,
    ) -> ApiResult<(ArtifactFilter, PageRequest)> {
        let package_types = split_csv(self.package_type.as_deref())
            .map(str::parse::<PackageType>)
            .collect::<Result<Vec<_>, _>>()?;

        let filter = ArtifactFilter {
            registry,
            package_types,
            search_term: non_empty(self.search_term),
            labels: split_csv(self.label.as_deref()).map(String::from).collect(),
        };

        Ok((
            filter,
            PageRequest {
                page: self.page,
                size: self.size,
            },
        ))
    }
}

/// Query parameters for label listings
#[derive(Debug, Default, Deserialize)]
pub struct ListLabelsParams {
    /// 1-based page index
    pub page: Option<i64>,

    /// Page size
    pub size: Option<i32>,

    /// Case-insensitive substring of the label
    pub search_term: Option<String>,
}

impl ListLabelsParams {
    /// Split into a filter and a page request
    pub fn into_filter(self, registry: Option<String>) -> (LabelFilter, PageRequest) {
        (
            LabelFilter {
                registry,
                search_term: non_empty(self.search_term),
            },
            PageRequest {
                page: self.page,
                size: self.size,
            },
        )
    }
}

fn split_csv(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Artifact Handlers
// ============================================================================

/// List artifacts across all registries
#[instrument(skip(state))]
pub async fn list_artifacts(
    State(state): State<AppState>,
    params: Result<Query<ListArtifactsParams>, QueryRejection>,
) -> ApiResult<Json<PagedArtifactResponse>> {
    let Query(params) = params?;
    let (filter, page) = params.into_filter(None)?;

    let response = state.listing.list_artifacts(filter, page).await?;
    Ok(Json(response))
}

/// List artifacts in one registry
#[instrument(skip(state))]
pub async fn list_registry_artifacts(
    State(state): State<AppState>,
    Path(registry): Path<String>,
    params: Result<Query<ListArtifactsParams>, QueryRejection>,
) -> ApiResult<Json<PagedArtifactResponse>> {
    let Query(params) = params?;
    debug!("Listing artifacts in registry: {}", registry);
    let (filter, page) = params.into_filter(Some(registry))?;

    let response = state.listing.list_artifacts(filter, page).await?;
    Ok(Json(response))
}

/// Summarize one artifact
#[instrument(skip(state))]
pub async fn artifact_summary(
    State(state): State<AppState>,
    Path((registry, artifact)): Path<(String, String)>,
) -> ApiResult<Json<ResponseEnvelope<ImageSummary>>> {
    let response = state.listing.artifact_summary(&registry, &artifact).await?;
    Ok(Json(response))
}

/// Summarize one version of an artifact
#[instrument(skip(state))]
pub async fn version_summary(
    State(state): State<AppState>,
    Path((registry, artifact, version)): Path<(String, String, String)>,
) -> ApiResult<Json<ResponseEnvelope<ArtifactVersionSummary>>> {
    let response = state
        .listing
        .version_summary(&registry, &artifact, &version)
        .await?;
    Ok(Json(response))
}

/// List distinct labels across all registries
#[instrument(skip(state))]
pub async fn list_labels(
    State(state): State<AppState>,
    params: Result<Query<ListLabelsParams>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<ListArtifactLabel>>> {
    let Query(params) = params?;
    let (filter, page) = params.into_filter(None);

    let response = state.listing.list_labels(filter, page).await?;
    Ok(Json(response))
}

/// List distinct labels used in one registry
#[instrument(skip(state))]
pub async fn list_registry_labels(
    State(state): State<AppState>,
    Path(registry): Path<String>,
    params: Result<Query<ListLabelsParams>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<ListArtifactLabel>>> {
    let Query(params) = params?;
    let (filter, page) = params.into_filter(Some(registry));

    let response = state.listing.list_labels(filter, page).await?;
    Ok(Json(response))
}

// ============================================================================
// Health Handlers
// ============================================================================

/// Health check endpoint
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> HealthResponse {
    debug!("Health check requested");

    // A one-item label page is enough to prove the query layer answers.
    let probe = state
        .listing
        .list_labels(LabelFilter::default(), PageRequest::new(1, 1))
        .await;

    HealthResponse::new(env!("CARGO_PKG_VERSION"))
        .with_check("catalog", ComponentHealth::from_probe(probe))
}
