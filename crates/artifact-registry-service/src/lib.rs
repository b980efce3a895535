//! Service layer for the Artifact Registry
//!
//! This crate turns pages of artifact metadata into the response envelopes
//! served by the API. It sits between the API and whatever store answers
//! artifact queries.
//!
//! # Architecture
//!
//! - **mapper**: pure projection of metadata records into summaries and
//!   assembly of the paged envelopes
//! - **pagination**: request parameter defaults, limits and page counting
//! - **query**: the `ArtifactQuery` seam and an in-memory catalog
//! - **listing**: `ArtifactListingService`, which drives a paged listing
//!
//! # Example
//!
//! ```rust
//! use artifact_registry_core::{ArtifactMetadata, PackageType};
//! use artifact_registry_service::build;
//!
//! let records = vec![
//!     ArtifactMetadata::new("docker-local", "nginx", PackageType::Docker)
//!         .with_download_count(100)
//!         .with_labels(["web"]),
//! ];
//!
//! let response = build(&records, 1, 1, 1, 10);
//! assert_eq!(response.data.artifacts[0].downloads_count, Some(100));
//! ```

pub mod dto;
pub mod error;
pub mod listing;
pub mod mapper;
pub mod pagination;
pub mod query;

// Re-export main types for convenience
pub use dto::*;
pub use error::{ServiceError, ServiceResult};

// Re-export builders and the listing service
pub use listing::{ArtifactListingService, DefaultArtifactListingService};
pub use mapper::{
    build, build_image_summary, build_label_page, build_version_summary, project, project_all,
    time_in_ms,
};
pub use pagination::{page_count, PageRequest, PaginationConfig, ResolvedPage};
pub use query::{
    ArtifactFilter, ArtifactQuery, InMemoryArtifactCatalog, LabelFilter, QueryError, QueryResult,
};
