//! Test fixtures
//!
//! Artifact metadata records served by the integration test catalog.

use artifact_registry_core::{ArtifactMetadata, ArtifactType, PackageType};
use chrono::{DateTime, TimeZone, Utc};

/// Timestamp from epoch milliseconds
pub fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

/// Create a test artifact modified at `modified_ms`
pub fn create_test_artifact(
    registry: &str,
    name: &str,
    package_type: PackageType,
    modified_ms: i64,
) -> ArtifactMetadata {
    ArtifactMetadata::new(registry, name, package_type)
        .with_latest_version("1.0.0")
        .with_timestamps(at(1_700_000_000_000), at(modified_ms))
}

/// The standard catalog, newest first:
/// nginx, bert, redis, left-pad, commons-io
pub fn standard_catalog() -> Vec<ArtifactMetadata> {
    vec![
        create_test_artifact("docker-local", "nginx", PackageType::Docker, 1_710_000_000_000)
            .with_download_count(1520)
            .with_labels(["web", "proxy"]),
        create_test_artifact("docker-local", "redis", PackageType::Docker, 1_708_000_000_000)
            .with_download_count(830)
            .with_labels(["cache"]),
        create_test_artifact("npm-local", "left-pad", PackageType::Npm, 1_705_000_000_000),
        create_test_artifact("hf-local", "bert", PackageType::Huggingface, 1_709_000_000_000)
            .with_download_count(42)
            .with_labels(["nlp"])
            .with_artifact_type(ArtifactType::Model),
        create_test_artifact("maven-local", "commons-io", PackageType::Maven, 1_704_000_000_000)
            .with_download_count(77)
            .with_labels(Vec::<String>::new())
            .with_version("2.15.1")
            .with_latest_version("2.16.1")
            .quarantined(Some("under review".to_string())),
    ]
}

/// `count` generic artifacts in one registry, one second apart
pub fn bulk_catalog(registry: &str, count: usize) -> Vec<ArtifactMetadata> {
    (0..count)
        .map(|i| {
            create_test_artifact(
                registry,
                &format!("bundle-{:03}", i),
                PackageType::Generic,
                1_700_000_000_000 + (i as i64) * 1000,
            )
            .with_download_count(i as i64)
        })
        .collect()
}
