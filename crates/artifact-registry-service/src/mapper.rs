//! Metadata projection and response envelope assembly
//!
//! Everything in this module is a pure, total function: nothing here logs,
//! validates, or fails. Pagination counters are taken from the caller as-is;
//! checking them against the page contents is the query layer's business.

use artifact_registry_core::{ArtifactMetadata, ArtifactType, ImageMetadata, PackageType};
use chrono::{DateTime, Utc};

use crate::dto::{
    ArtifactSummary, ArtifactVersionSummary, ImageSummary, ListArtifactLabel,
    ListRegistryArtifact, PagedArtifactResponse, ResponseEnvelope,
};

/// Render a timestamp as epoch milliseconds
pub fn time_in_ms(timestamp: DateTime<Utc>) -> String {
    timestamp.timestamp_millis().to_string()
}

/// Project one metadata record into its external summary
pub fn project(record: &ArtifactMetadata) -> ArtifactSummary {
    // Absent labels become an empty list, never an absent field.
    let labels = match &record.labels {
        Some(labels) => labels.clone(),
        None => Vec::new(),
    };

    ArtifactSummary {
        registry_identifier: record.repo_name.clone(),
        name: record.name.clone(),
        latest_version: record.latest_version.clone(),
        package_type: record.package_type,
        downloads_count: Some(record.download_count),
        labels: Some(labels),
        last_modified: Some(time_in_ms(record.modified_at)),
        is_quarantined: Some(record.is_quarantined),
        artifact_type: record.artifact_type,
    }
}

/// Project every record, preserving order
pub fn project_all(records: &[ArtifactMetadata]) -> Vec<ArtifactSummary> {
    records.iter().map(project).collect()
}

/// Build the paged artifact listing envelope
///
/// `records` may be passed by value or by reference (`Vec`, `&Vec`, slices,
/// arrays). The four counters are copied verbatim; they are not recomputed
/// from `records` and may legitimately disagree with its length.
pub fn build<R>(
    records: R,
    item_count: i64,
    page_count: i64,
    page_index: i64,
    page_size: i32,
) -> PagedArtifactResponse
where
    R: AsRef<[ArtifactMetadata]>,
{
    ResponseEnvelope::success(ListRegistryArtifact {
        item_count: Some(item_count),
        page_count: Some(page_count),
        page_index: Some(page_index),
        page_size: Some(page_size),
        artifacts: project_all(records.as_ref()),
    })
}

/// Build the paged label listing envelope
pub fn build_label_page<L>(
    labels: L,
    item_count: i64,
    page_count: i64,
    page_index: i64,
    page_size: i32,
) -> ResponseEnvelope<ListArtifactLabel>
where
    L: AsRef<[String]>,
{
    ResponseEnvelope::success(ListArtifactLabel {
        item_count: Some(item_count),
        page_count: Some(page_count),
        page_index: Some(page_index),
        page_size: Some(page_size),
        labels: labels.as_ref().to_vec(),
    })
}

/// Build the image summary envelope
pub fn build_image_summary(image: &ImageMetadata) -> ResponseEnvelope<ImageSummary> {
    ResponseEnvelope::success(ImageSummary {
        image_name: image.name.clone(),
        package_type: image.package_type,
        artifact_type: image.artifact_type,
        created_at: Some(time_in_ms(image.created_at)),
        modified_at: Some(time_in_ms(image.modified_at)),
        downloads_count: Some(image.download_count),
    })
}

/// Build the version summary envelope
pub fn build_version_summary(
    name: impl Into<String>,
    package_type: PackageType,
    version: impl Into<String>,
    is_quarantined: bool,
    quarantine_reason: impl Into<String>,
    artifact_type: Option<ArtifactType>,
) -> ResponseEnvelope<ArtifactVersionSummary> {
    ResponseEnvelope::success(ArtifactVersionSummary {
        image_name: name.into(),
        package_type,
        version: version.into(),
        is_quarantined: Some(is_quarantined),
        quarantine_reason: Some(quarantine_reason.into()),
        artifact_type,
    })
}
