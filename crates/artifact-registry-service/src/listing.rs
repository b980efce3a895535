//! Listing service
//!
//! This module drives a paged listing end to end: it resolves the requested
//! page, asks the query layer for the total and the page contents, derives
//! the page counter, and hands everything to the envelope builders.

use artifact_registry_core::RegistryError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::dto::{
    ArtifactVersionSummary, ImageSummary, ListArtifactLabel, PagedArtifactResponse,
    ResponseEnvelope,
};
use crate::error::ServiceResult;
use crate::mapper::{build, build_image_summary, build_label_page, build_version_summary};
use crate::pagination::{page_count, PageRequest, PaginationConfig};
use crate::query::{ArtifactFilter, ArtifactQuery, LabelFilter};

/// Trait for paged listing operations
#[async_trait]
pub trait ArtifactListingService: Send + Sync {
    /// List artifacts matching a filter
    async fn list_artifacts(
        &self,
        filter: ArtifactFilter,
        page: PageRequest,
    ) -> ServiceResult<PagedArtifactResponse>;

    /// List distinct artifact labels
    async fn list_labels(
        &self,
        filter: LabelFilter,
        page: PageRequest,
    ) -> ServiceResult<ResponseEnvelope<ListArtifactLabel>>;

    /// Summarize one artifact
    async fn artifact_summary(
        &self,
        registry: &str,
        name: &str,
    ) -> ServiceResult<ResponseEnvelope<ImageSummary>>;

    /// Summarize one version of an artifact, including its quarantine state
    async fn version_summary(
        &self,
        registry: &str,
        name: &str,
        version: &str,
    ) -> ServiceResult<ResponseEnvelope<ArtifactVersionSummary>>;
}

/// Default implementation of ArtifactListingService
pub struct DefaultArtifactListingService {
    query: Arc<dyn ArtifactQuery>,
    pagination: PaginationConfig,
}

impl DefaultArtifactListingService {
    /// Create a new listing service
    pub fn new(query: Arc<dyn ArtifactQuery>, pagination: PaginationConfig) -> Self {
        Self { query, pagination }
    }

    /// Pagination limits in effect
    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }
}

#[async_trait]
impl ArtifactListingService for DefaultArtifactListingService {
    #[instrument(skip(self))]
    async fn list_artifacts(
        &self,
        filter: ArtifactFilter,
        page: PageRequest,
    ) -> ServiceResult<PagedArtifactResponse> {
        let window = page.resolve(&self.pagination)?;

        let item_count = self.query.count_artifacts(&filter).await?;
        let records = self
            .query
            .list_artifacts(&filter, window.offset, window.limit)
            .await?;

        debug!(
            item_count,
            returned = records.len(),
            page_index = window.page_index,
            "Fetched artifact page"
        );

        Ok(build(
            records,
            item_count,
            page_count(item_count, window.page_size),
            window.page_index,
            window.page_size,
        ))
    }

    #[instrument(skip(self))]
    async fn list_labels(
        &self,
        filter: LabelFilter,
        page: PageRequest,
    ) -> ServiceResult<ResponseEnvelope<ListArtifactLabel>> {
        let window = page.resolve(&self.pagination)?;

        let item_count = self.query.count_labels(&filter).await?;
        let labels = self
            .query
            .list_labels(&filter, window.offset, window.limit)
            .await?;

        Ok(build_label_page(
            labels,
            item_count,
            page_count(item_count, window.page_size),
            window.page_index,
            window.page_size,
        ))
    }

    #[instrument(skip(self))]
    async fn artifact_summary(
        &self,
        registry: &str,
        name: &str,
    ) -> ServiceResult<ResponseEnvelope<ImageSummary>> {
        let image = self
            .query
            .find_image(registry, name)
            .await?
            .ok_or_else(|| RegistryError::ArtifactNotFound(format!("{}/{}", registry, name)))?;

        Ok(build_image_summary(&image))
    }

    #[instrument(skip(self))]
    async fn version_summary(
        &self,
        registry: &str,
        name: &str,
        version: &str,
    ) -> ServiceResult<ResponseEnvelope<ArtifactVersionSummary>> {
        let record = self
            .query
            .find_version(registry, name, version)
            .await?
            .ok_or_else(|| {
                RegistryError::ArtifactNotFound(format!("{}/{}:{}", registry, name, version))
            })?;

        Ok(build_version_summary(
            record.name,
            record.package_type,
            version,
            record.is_quarantined,
            record.quarantine_reason.unwrap_or_default(),
            record.artifact_type,
        ))
    }
}
