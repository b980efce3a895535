//! Artifact metadata records
//!
//! These are the storage-shaped records handed over by the query layer.
//! They are never mutated by the mapping layer; projections into the
//! external API shape live in the service crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::types::{ArtifactType, Labels, PackageType};

/// One artifact (or artifact version) row as returned by a paged query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Identifier, unique within the registry
    #[serde(default)]
    pub id: i64,

    /// Registry the artifact lives in
    pub repo_name: String,

    /// Artifact name
    pub name: String,

    /// Version this row refers to (version listings only)
    #[serde(default)]
    pub version: String,

    /// Most recent version of the artifact
    #[serde(default)]
    pub latest_version: String,

    /// Package format
    pub package_type: PackageType,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,

    /// Number of downloads across all versions
    #[serde(default)]
    pub download_count: i64,

    /// Labels attached to the artifact; `None` when the store has none recorded,
    /// which is not the same as an explicitly empty list
    #[serde(default)]
    pub labels: Option<Labels>,

    /// Whether the artifact is quarantined
    #[serde(default)]
    pub is_quarantined: bool,

    /// Reason for the quarantine, if any
    #[serde(default)]
    pub quarantine_reason: Option<String>,

    /// Model / dataset classification for Hugging Face artifacts
    #[serde(default)]
    pub artifact_type: Option<ArtifactType>,
}

impl ArtifactMetadata {
    /// Create a record with zeroed counters and both timestamps set to now
    pub fn new(
        repo_name: impl Into<String>,
        name: impl Into<String>,
        package_type: PackageType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            repo_name: repo_name.into(),
            name: name.into(),
            version: String::new(),
            latest_version: String::new(),
            package_type,
            created_at: now,
            modified_at: now,
            download_count: 0,
            labels: None,
            is_quarantined: false,
            quarantine_reason: None,
            artifact_type: None,
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Set the version this row refers to
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the latest version
    pub fn with_latest_version(mut self, version: impl Into<String>) -> Self {
        self.latest_version = version.into();
        self
    }

    /// Set the download counter
    pub fn with_download_count(mut self, count: i64) -> Self {
        self.download_count = count;
        self
    }

    /// Attach labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set creation and modification timestamps
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, modified_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.modified_at = modified_at;
        self
    }

    /// Mark the artifact as quarantined
    pub fn quarantined(mut self, reason: Option<String>) -> Self {
        self.is_quarantined = true;
        self.quarantine_reason = reason;
        self
    }

    /// Set the artifact type
    pub fn with_artifact_type(mut self, artifact_type: ArtifactType) -> Self {
        self.artifact_type = Some(artifact_type);
        self
    }

    /// Whether the record carries the given label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels
            .as_deref()
            .is_some_and(|labels| labels.iter().any(|l| l == label))
    }

    /// Validate the record before it is accepted into a catalog
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::ValidationError(
                "Artifact name cannot be empty".to_string(),
            ));
        }
        if self.repo_name.trim().is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "Artifact {} has no registry",
                self.name
            )));
        }
        if self.download_count < 0 {
            return Err(RegistryError::ValidationError(format!(
                "Artifact {} has a negative download count",
                self.name
            )));
        }
        Ok(())
    }
}

/// Image-level aggregate used for artifact summary pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Image / artifact name
    pub name: String,

    /// Package format
    pub package_type: PackageType,

    /// Model / dataset classification
    #[serde(default)]
    pub artifact_type: Option<ArtifactType>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,

    /// Number of downloads across all versions
    #[serde(default)]
    pub download_count: i64,
}

impl From<&ArtifactMetadata> for ImageMetadata {
    fn from(artifact: &ArtifactMetadata) -> Self {
        Self {
            name: artifact.name.clone(),
            package_type: artifact.package_type,
            artifact_type: artifact.artifact_type,
            created_at: artifact.created_at,
            modified_at: artifact.modified_at,
            download_count: artifact.download_count,
        }
    }
}
