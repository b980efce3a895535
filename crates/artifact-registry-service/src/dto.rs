//! Data Transfer Objects (DTOs) for service layer
//!
//! This module defines the API-shaped records returned by the listing
//! service, separating the storage-shaped metadata of the core crate from
//! what the HTTP layer serializes. Optional scalars stay `Option` so that a
//! present zero is never confused with an absent value.

use artifact_registry_core::{ArtifactType, PackageType, Status};
use serde::{Deserialize, Serialize};

// ============================================================================
// Envelope
// ============================================================================

/// Status-tagged response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Outcome tag
    pub status: Status,

    /// Payload
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    /// Wrap a payload in a success envelope
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data,
        }
    }
}

// ============================================================================
// Artifact listing DTOs
// ============================================================================

/// External view of one artifact in a registry listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    /// Registry the artifact lives in
    pub registry_identifier: String,

    /// Artifact name
    pub name: String,

    /// Most recent version
    pub latest_version: String,

    /// Package format
    pub package_type: PackageType,

    /// Download counter; populated even when zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads_count: Option<i64>,

    /// Labels; populated even when the artifact has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    /// Last modification, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Quarantine flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_quarantined: Option<bool>,

    /// Model / dataset classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<ArtifactType>,
}

/// One page of registry artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistryArtifact {
    /// Total matching items across all pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,

    /// Total number of pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,

    /// Current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<i64>,

    /// Requested page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,

    /// Artifacts on this page, in query order
    pub artifacts: Vec<ArtifactSummary>,
}

/// Paged registry artifact response
pub type PagedArtifactResponse = ResponseEnvelope<ListRegistryArtifact>;

/// One page of artifact labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArtifactLabel {
    /// Total matching labels across all pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,

    /// Total number of pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,

    /// Current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<i64>,

    /// Requested page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,

    /// Labels on this page
    pub labels: Vec<String>,
}

// ============================================================================
// Summary DTOs
// ============================================================================

/// Image-level summary of an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    /// Image / artifact name
    pub image_name: String,

    /// Package format
    pub package_type: PackageType,

    /// Model / dataset classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<ArtifactType>,

    /// Creation, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last modification, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,

    /// Download counter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads_count: Option<i64>,
}

/// Summary of one artifact version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactVersionSummary {
    /// Image / artifact name
    pub image_name: String,

    /// Package format
    pub package_type: PackageType,

    /// Version
    pub version: String,

    /// Quarantine flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_quarantined: Option<bool>,

    /// Quarantine reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarantine_reason: Option<String>,

    /// Model / dataset classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<ArtifactType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let envelope = ResponseEnvelope::success(42);
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.data, 42);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ArtifactSummary {
            registry_identifier: "repo".to_string(),
            name: "lib".to_string(),
            latest_version: "1.0.0".to_string(),
            package_type: PackageType::Npm,
            downloads_count: Some(0),
            labels: Some(vec![]),
            last_modified: None,
            is_quarantined: Some(false),
            artifact_type: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["registryIdentifier"], "repo");
        assert_eq!(json["latestVersion"], "1.0.0");
        assert_eq!(json["downloadsCount"], 0);
        assert_eq!(json["labels"], serde_json::json!([]));
        assert!(json.get("lastModified").is_none());
        assert!(json.get("artifactType").is_none());
    }

    #[test]
    fn test_list_serializes_counters() {
        let list = ListRegistryArtifact {
            item_count: Some(0),
            page_count: Some(0),
            page_index: Some(1),
            page_size: Some(10),
            artifacts: vec![],
        };

        let json = serde_json::to_string(&ResponseEnvelope::success(list)).unwrap();
        assert!(json.contains("\"status\":\"SUCCESS\""));
        assert!(json.contains("\"itemCount\":0"));
        assert!(json.contains("\"pageSize\":10"));
        assert!(json.contains("\"artifacts\":[]"));
    }
}
