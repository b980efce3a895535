//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests including
//! test setup, fixtures, and helper functions.

#![allow(dead_code)]

use artifact_registry_api::build_api_server;
use artifact_registry_core::ArtifactMetadata;
use artifact_registry_service::{
    DefaultArtifactListingService, InMemoryArtifactCatalog, PaginationConfig,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod fixtures;

/// Test application state
pub struct TestApp {
    pub address: String,
    pub catalog: Arc<InMemoryArtifactCatalog>,
}

impl TestApp {
    /// Start a server over the standard fixture catalog
    pub async fn new() -> Self {
        Self::with_records(fixtures::standard_catalog()).await
    }

    /// Start a server over the given records
    pub async fn with_records(records: Vec<ArtifactMetadata>) -> Self {
        Self::with_config(records, PaginationConfig::default()).await
    }

    /// Start a server with custom pagination limits
    pub async fn with_config(records: Vec<ArtifactMetadata>, pagination: PaginationConfig) -> Self {
        let catalog = Arc::new(
            InMemoryArtifactCatalog::from_records(records).expect("Invalid fixture records"),
        );
        let listing = Arc::new(DefaultArtifactListingService::new(
            catalog.clone(),
            pagination,
        ));

        let app = build_api_server(listing);

        // Start server on random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to start test server");
        });

        Self {
            address: format!("http://{}", address),
            catalog,
        }
    }

    /// Get base URL
    pub fn url(&self) -> &str {
        &self.address
    }

    /// Create HTTP client
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build client")
    }

    /// GET a path relative to the base URL
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client()
            .get(format!("{}{}", self.url(), path))
            .send()
            .await
            .expect("Failed to send request")
    }
}

/// Parse JSON response
pub async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> T {
    response
        .json::<T>()
        .await
        .expect("Failed to parse JSON response")
}

/// Assert response status
pub fn assert_status(response: &reqwest::Response, expected: reqwest::StatusCode) {
    assert_eq!(
        response.status(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}

/// Assert response is successful (2xx)
pub fn assert_success(response: &reqwest::Response) {
    assert!(
        response.status().is_success(),
        "Expected success status, got {}",
        response.status()
    );
}

/// Names of the artifacts in a listing body, in order
pub fn artifact_names(body: &serde_json::Value) -> Vec<String> {
    body["data"]["artifacts"]
        .as_array()
        .expect("artifacts is not an array")
        .iter()
        .map(|a| a["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
