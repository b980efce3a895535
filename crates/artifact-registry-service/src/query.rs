//! Query layer abstraction
//!
//! This module defines the `ArtifactQuery` trait through which the listing
//! service obtains pages of artifact metadata, allowing different storage
//! implementations (a database, a remote index, the in-memory catalog
//! shipped here for tests and local runs).

use artifact_registry_core::{ArtifactMetadata, ImageMetadata, PackageType, RegistryError};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query-layer errors
#[derive(Debug, Error)]
pub enum QueryError {
    /// The filter cannot be executed
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The backing store could not be reached or read
    #[error("Query backend unavailable: {0}")]
    Unavailable(String),

    /// Domain error raised while loading records
    #[error(transparent)]
    Domain(#[from] RegistryError),
}

/// Filter for artifact listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFilter {
    /// Restrict to one registry
    pub registry: Option<String>,

    /// Restrict to these package types (empty means all)
    pub package_types: Vec<PackageType>,

    /// Case-insensitive substring of the artifact name
    pub search_term: Option<String>,

    /// Artifact must carry all of these labels
    pub labels: Vec<String>,
}

impl ArtifactFilter {
    /// Create an empty filter matching every artifact
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one registry
    pub fn registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Add a package type
    pub fn package_type(mut self, package_type: PackageType) -> Self {
        self.package_types.push(package_type);
        self
    }

    /// Set the name search term
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Require a label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Whether a record passes the filter
    pub fn matches(&self, record: &ArtifactMetadata) -> bool {
        if let Some(registry) = &self.registry {
            if &record.repo_name != registry {
                return false;
            }
        }
        if !self.package_types.is_empty() && !self.package_types.contains(&record.package_type) {
            return false;
        }
        if let Some(term) = &self.search_term {
            if !record.name.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        self.labels.iter().all(|label| record.has_label(label))
    }
}

/// Filter for label listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFilter {
    /// Restrict to labels used in one registry
    pub registry: Option<String>,

    /// Case-insensitive substring of the label
    pub search_term: Option<String>,
}

/// Paged lookups against artifact storage
#[async_trait]
pub trait ArtifactQuery: Send + Sync {
    /// Count artifacts matching the filter across all pages
    async fn count_artifacts(&self, filter: &ArtifactFilter) -> QueryResult<i64>;

    /// Fetch one page of artifacts matching the filter
    async fn list_artifacts(
        &self,
        filter: &ArtifactFilter,
        offset: i64,
        limit: i64,
    ) -> QueryResult<Vec<ArtifactMetadata>>;

    /// Count distinct labels matching the filter
    async fn count_labels(&self, filter: &LabelFilter) -> QueryResult<i64>;

    /// Fetch one page of distinct labels, sorted
    async fn list_labels(
        &self,
        filter: &LabelFilter,
        offset: i64,
        limit: i64,
    ) -> QueryResult<Vec<String>>;

    /// Look up the image-level aggregate of an artifact
    async fn find_image(&self, registry: &str, name: &str) -> QueryResult<Option<ImageMetadata>>;

    /// Look up one version of an artifact
    ///
    /// A record without a version of its own stands for its latest version.
    async fn find_version(
        &self,
        registry: &str,
        name: &str,
        version: &str,
    ) -> QueryResult<Option<ArtifactMetadata>>;
}

/// In-memory `ArtifactQuery` implementation
///
/// Records are kept most-recently-modified first, ties broken by name.
#[derive(Debug, Default)]
pub struct InMemoryArtifactCatalog {
    records: RwLock<Vec<ArtifactMetadata>>,
}

impl InMemoryArtifactCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from validated records
    pub fn from_records(records: Vec<ArtifactMetadata>) -> QueryResult<Self> {
        for record in &records {
            record.validate()?;
        }
        let mut records = records;
        records.sort_by(listing_order);
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Load a catalog from a JSON array of artifact metadata records
    pub fn from_json_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::IoError(format!("{}: {}", path.display(), e)))?;
        let records: Vec<ArtifactMetadata> =
            serde_json::from_str(&contents).map_err(RegistryError::from)?;

        info!(path = %path.display(), count = records.len(), "Loaded artifact catalog");
        Self::from_records(records)
    }

    /// Add a record
    pub async fn insert(&self, record: ArtifactMetadata) -> QueryResult<()> {
        record.validate()?;
        let mut records = self.records.write().await;
        records.push(record);
        records.sort_by(listing_order);
        Ok(())
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the catalog is empty
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn distinct_labels(&self, filter: &LabelFilter) -> BTreeSet<String> {
        let records = self.records.read().await;
        let term = filter.search_term.as_ref().map(|t| t.to_lowercase());

        records
            .iter()
            .filter(|r| filter.registry.as_ref().map_or(true, |reg| &r.repo_name == reg))
            .flat_map(|r| r.labels.iter().flatten())
            .filter(|label| {
                term.as_ref()
                    .map_or(true, |t| label.to_lowercase().contains(t.as_str()))
            })
            .cloned()
            .collect()
    }
}

fn listing_order(a: &ArtifactMetadata, b: &ArtifactMetadata) -> Ordering {
    b.modified_at
        .cmp(&a.modified_at)
        .then_with(|| a.name.cmp(&b.name))
}

fn window(offset: i64, limit: i64) -> QueryResult<(usize, usize)> {
    let offset = usize::try_from(offset)
        .map_err(|_| QueryError::InvalidFilter(format!("Negative offset: {}", offset)))?;
    let limit = usize::try_from(limit)
        .map_err(|_| QueryError::InvalidFilter(format!("Negative limit: {}", limit)))?;
    Ok((offset, limit))
}

#[async_trait]
impl ArtifactQuery for InMemoryArtifactCatalog {
    async fn count_artifacts(&self, filter: &ArtifactFilter) -> QueryResult<i64> {
        let records = self.records.read().await;
        let count = records.iter().filter(|r| filter.matches(r)).count();
        Ok(count as i64)
    }

    async fn list_artifacts(
        &self,
        filter: &ArtifactFilter,
        offset: i64,
        limit: i64,
    ) -> QueryResult<Vec<ArtifactMetadata>> {
        let (offset, limit) = window(offset, limit)?;
        let records = self.records.read().await;

        let page: Vec<ArtifactMetadata> = records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        debug!(offset, limit, returned = page.len(), "Listed artifacts");
        Ok(page)
    }

    async fn count_labels(&self, filter: &LabelFilter) -> QueryResult<i64> {
        Ok(self.distinct_labels(filter).await.len() as i64)
    }

    async fn list_labels(
        &self,
        filter: &LabelFilter,
        offset: i64,
        limit: i64,
    ) -> QueryResult<Vec<String>> {
        let (offset, limit) = window(offset, limit)?;
        Ok(self
            .distinct_labels(filter)
            .await
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn find_image(&self, registry: &str, name: &str) -> QueryResult<Option<ImageMetadata>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.repo_name == registry && r.name == name)
            .map(ImageMetadata::from))
    }

    async fn find_version(
        &self,
        registry: &str,
        name: &str,
        version: &str,
    ) -> QueryResult<Option<ArtifactMetadata>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| {
                r.repo_name == registry
                    && r.name == name
                    && (r.version == version
                        || (r.version.is_empty() && r.latest_version == version))
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(repo: &str, name: &str, package_type: PackageType, modified: i64) -> ArtifactMetadata {
        let at = Utc.timestamp_millis_opt(modified).unwrap();
        ArtifactMetadata::new(repo, name, package_type).with_timestamps(at, at)
    }

    fn catalog() -> InMemoryArtifactCatalog {
        InMemoryArtifactCatalog::from_records(vec![
            record("repo1", "alpha", PackageType::Npm, 1000).with_labels(["web", "prod"]),
            record("repo1", "beta", PackageType::Docker, 3000).with_labels(["prod"]),
            record("repo2", "gamma", PackageType::Npm, 2000),
            record("repo2", "Alpine", PackageType::Docker, 2000).with_labels(["base"]),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_orders_by_modified_desc() {
        let catalog = catalog();
        let page = catalog
            .list_artifacts(&ArtifactFilter::new(), 0, 10)
            .await
            .unwrap();
        let names: Vec<&str> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "Alpine", "gamma", "alpha"]);
    }

    #[tokio::test]
    async fn test_filter_by_registry_and_type() {
        let catalog = catalog();
        let filter = ArtifactFilter::new()
            .registry("repo2")
            .package_type(PackageType::Npm);
        assert_eq!(catalog.count_artifacts(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_filter_by_search_term_is_case_insensitive() {
        let catalog = catalog();
        let filter = ArtifactFilter::new().search_term("ALP");
        let page = catalog.list_artifacts(&filter, 0, 10).await.unwrap();
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_labels_requires_all() {
        let catalog = catalog();
        let filter = ArtifactFilter::new().label("prod").label("web");
        let page = catalog.list_artifacts(&filter, 0, 10).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "alpha");
    }

    #[tokio::test]
    async fn test_list_window() {
        let catalog = catalog();
        let page = catalog
            .list_artifacts(&ArtifactFilter::new(), 3, 10)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert!(catalog
            .list_artifacts(&ArtifactFilter::new(), -1, 10)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_labels_are_distinct_and_sorted() {
        let catalog = catalog();
        let labels = catalog
            .list_labels(&LabelFilter::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(labels, vec!["base", "prod", "web"]);
        assert_eq!(catalog.count_labels(&LabelFilter::default()).await.unwrap(), 3);

        let filter = LabelFilter {
            registry: Some("repo1".to_string()),
            search_term: Some("W".to_string()),
        };
        assert_eq!(catalog.list_labels(&filter, 0, 10).await.unwrap(), vec!["web"]);
    }

    #[tokio::test]
    async fn test_find_image() {
        let catalog = catalog();
        let image = catalog.find_image("repo1", "beta").await.unwrap();
        assert_eq!(image.map(|i| i.package_type), Some(PackageType::Docker));
        assert!(catalog.find_image("repo2", "beta").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_validates() {
        let catalog = InMemoryArtifactCatalog::new();
        assert!(catalog.is_empty().await);
        assert!(catalog
            .insert(ArtifactMetadata::new("repo", "", PackageType::Generic))
            .await
            .is_err());
        catalog
            .insert(ArtifactMetadata::new("repo", "bundle", PackageType::Generic))
            .await
            .unwrap();
        assert_eq!(catalog.len().await, 1);
    }

    #[test]
    fn test_from_json_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"repo_name":"docker-local","name":"nginx","package_type":"DOCKER",
                "created_at":"2024-01-01T00:00:00Z","modified_at":"2024-01-02T00:00:00Z",
                "download_count":12,"labels":["web"]}}]"#
        )
        .unwrap();

        let catalog = InMemoryArtifactCatalog::from_json_file(file.path()).unwrap();
        let records = tokio_test::block_on(catalog.list_artifacts(&ArtifactFilter::new(), 0, 10))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].download_count, 12);
        assert_eq!(records[0].labels, Some(vec!["web".to_string()]));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = InMemoryArtifactCatalog::from_json_file("/nonexistent/catalog.json");
        assert!(matches!(
            result,
            Err(QueryError::Domain(RegistryError::IoError(ref m))) if m.contains("catalog.json")
        ));
    }

    #[tokio::test]
    async fn test_find_version() {
        let catalog = InMemoryArtifactCatalog::from_records(vec![
            record("repo1", "lib", PackageType::Maven, 1000)
                .with_version("1.0.0")
                .with_latest_version("2.0.0")
                .quarantined(Some("cve".to_string())),
            record("repo1", "app", PackageType::Maven, 1000).with_latest_version("3.1.0"),
        ])
        .unwrap();

        let pinned = catalog.find_version("repo1", "lib", "1.0.0").await.unwrap();
        assert_eq!(pinned.and_then(|r| r.quarantine_reason).as_deref(), Some("cve"));
        assert!(catalog.find_version("repo1", "lib", "2.0.0").await.unwrap().is_none());
        assert!(catalog.find_version("repo1", "app", "3.1.0").await.unwrap().is_some());
        assert!(catalog.find_version("repo2", "lib", "1.0.0").await.unwrap().is_none());
    }
}
