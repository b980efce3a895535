//! Core domain models and types for the Artifact Registry
//!
//! This crate contains the records, enums, and error taxonomy shared by the
//! listing service and the HTTP layer: artifact metadata as produced by the
//! query layer, package and artifact classifications, and the response
//! status tag carried by every envelope.

pub mod error;
pub mod metadata;
pub mod types;

// Re-exports for convenience
pub use error::{RegistryError, Result};
pub use metadata::{ArtifactMetadata, ImageMetadata};
pub use types::{ArtifactType, Labels, PackageType, Status};
