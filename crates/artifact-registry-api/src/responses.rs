//! Health check response
//!
//! `/health` reports one entry per probed dependency. The service is healthy
//! only while every entry is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Health of the service or of one dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of probing one dependency
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,

    /// Probe failure, absent when healthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    /// Classify a probe result
    pub fn from_probe<T, E: Display>(probe: Result<T, E>) -> Self {
        match probe {
            Ok(_) => Self {
                status: HealthStatus::Healthy,
                error: None,
            },
            Err(e) => Self {
                status: HealthStatus::Unhealthy,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Start with no checks recorded
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            version: version.into(),
            checks: BTreeMap::new(),
        }
    }

    /// Record a dependency; any unhealthy entry marks the whole service unhealthy
    pub fn with_check(mut self, name: impl Into<String>, health: ComponentHealth) -> Self {
        if health.status == HealthStatus::Unhealthy {
            self.status = HealthStatus::Unhealthy;
        }
        self.checks.insert(name.into(), health);
        self
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let code = match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        };
        (code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_catalog() {
        let probe: Result<(), String> = Ok(());
        let response =
            HealthResponse::new("0.1.0").with_check("catalog", ComponentHealth::from_probe(probe));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["checks"]["catalog"]["status"], "healthy");
        assert!(json["checks"]["catalog"].get("error").is_none());
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn test_failed_probe_makes_service_unavailable() {
        let response = HealthResponse::new("0.1.0")
            .with_check("catalog", ComponentHealth::from_probe(Err::<(), _>("store offline")));

        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(
            response.checks["catalog"].error.as_deref(),
            Some("store offline")
        );
        assert_eq!(response.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
