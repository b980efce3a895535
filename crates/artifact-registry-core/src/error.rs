//! Error types for the Artifact Registry

use thiserror::Error;

/// Result type alias for Registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Main error type for Registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Artifact not found
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    /// Unknown package type string
    #[error("Invalid package type: {0}")]
    InvalidPackageType(String),

    /// Unknown artifact type string
    #[error("Invalid artifact type: {0}")]
    InvalidArtifactType(String),

    /// Unknown status string
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Reading a record source failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::SerializationError(err.to_string())
    }
}
