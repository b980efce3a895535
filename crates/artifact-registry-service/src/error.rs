//! Service-layer error types
//!
//! This module defines error types specific to the service layer,
//! mapping domain and query-layer errors to service-level errors.

use artifact_registry_core::RegistryError;
use thiserror::Error;

use crate::query::QueryError;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Service-layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Requested artifact or registry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Query layer failed
    #[error("Query failed: {0}")]
    Query(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for ServiceError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ArtifactNotFound(msg) => ServiceError::NotFound(msg),
            RegistryError::InvalidPackageType(_)
            | RegistryError::InvalidArtifactType(_)
            | RegistryError::InvalidStatus(_)
            | RegistryError::ValidationError(_) => ServiceError::InvalidInput(err.to_string()),
            _ => ServiceError::Internal(err.to_string()),
        }
    }
}

impl From<QueryError> for ServiceError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidFilter(msg) => ServiceError::InvalidInput(msg),
            QueryError::Unavailable(msg) => ServiceError::Query(msg),
            QueryError::Domain(err) => ServiceError::from(err),
        }
    }
}
