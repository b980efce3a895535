//! Property-based tests for metadata projection and envelope assembly.
//!
//! Randomized record sets check that the builders preserve length and order,
//! never drop the label or download fields, and pass counters through untouched.

use artifact_registry_core::{ArtifactMetadata, ArtifactType, PackageType, Status};
use artifact_registry_service::{build, page_count, project, project_all};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn package_type() -> impl Strategy<Value = PackageType> {
    prop::sample::select(PackageType::ALL.to_vec())
}

fn artifact_type() -> impl Strategy<Value = Option<ArtifactType>> {
    prop::option::of(prop::sample::select(vec![ArtifactType::Model, ArtifactType::Dataset]))
}

prop_compose! {
    fn record()(
        repo in "[a-z][a-z0-9-]{0,15}",
        name in "[a-zA-Z][a-zA-Z0-9._-]{0,23}",
        latest in "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
        package_type in package_type(),
        downloads in any::<i64>(),
        labels in prop::option::of(prop::collection::vec("[a-z]{1,8}", 0..4)),
        modified in 0i64..4_102_444_800_000,
        quarantined in any::<bool>(),
        artifact_type in artifact_type(),
    ) -> ArtifactMetadata {
        let at = Utc.timestamp_millis_opt(modified).unwrap();
        let mut record = ArtifactMetadata::new(repo, name, package_type)
            .with_latest_version(latest)
            .with_download_count(downloads)
            .with_timestamps(at, at);
        record.labels = labels;
        record.is_quarantined = quarantined;
        record.artifact_type = artifact_type;
        record
    }
}

proptest! {
    #[test]
    fn projection_preserves_length_and_order(records in prop::collection::vec(record(), 0..32)) {
        let summaries = project_all(&records);

        prop_assert_eq!(summaries.len(), records.len());
        for (summary, source) in summaries.iter().zip(&records) {
            prop_assert_eq!(&summary.name, &source.name);
            prop_assert_eq!(&summary.registry_identifier, &source.repo_name);
        }
    }

    #[test]
    fn labels_and_downloads_always_present(source in record()) {
        let summary = project(&source);

        prop_assert_eq!(summary.downloads_count, Some(source.download_count));
        let expected = source.labels.clone().unwrap_or_default();
        prop_assert_eq!(summary.labels, Some(expected));
    }

    #[test]
    fn counters_pass_through_verbatim(
        records in prop::collection::vec(record(), 0..8),
        item_count in any::<i64>(),
        pages in any::<i64>(),
        page_index in any::<i64>(),
        page_size in any::<i32>(),
    ) {
        let response = build(&records, item_count, pages, page_index, page_size);

        prop_assert_eq!(response.status, Status::Success);
        prop_assert_eq!(response.data.item_count, Some(item_count));
        prop_assert_eq!(response.data.page_count, Some(pages));
        prop_assert_eq!(response.data.page_index, Some(page_index));
        prop_assert_eq!(response.data.page_size, Some(page_size));
        prop_assert_eq!(response.data.artifacts.len(), records.len());
    }

    #[test]
    fn build_by_value_matches_build_by_reference(records in prop::collection::vec(record(), 0..8)) {
        let by_ref = build(&records, 1, 1, 1, 10);
        let by_value = build(records.clone(), 1, 1, 1, 10);
        prop_assert_eq!(by_ref, by_value);
    }

    #[test]
    fn page_count_covers_every_item(item_count in 0i64..1_000_000, page_size in 1i32..=100) {
        let pages = page_count(item_count, page_size);
        let size = i64::from(page_size);

        prop_assert!(pages * size >= item_count);
        prop_assert!(pages == 0 || (pages - 1) * size < item_count);
    }
}
