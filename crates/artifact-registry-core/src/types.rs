//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Package format / ecosystem of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageType {
    /// OCI container image
    Docker,
    /// Generic file bundle
    Generic,
    /// Helm chart
    Helm,
    /// Maven artifact
    Maven,
    /// Python distribution
    Python,
    /// npm package
    Npm,
    /// RPM package
    Rpm,
    /// NuGet package
    Nuget,
    /// Go module
    Go,
    /// Hugging Face model or dataset
    Huggingface,
}

impl PackageType {
    /// All known package types, in declaration order
    pub const ALL: [PackageType; 10] = [
        Self::Docker,
        Self::Generic,
        Self::Helm,
        Self::Maven,
        Self::Python,
        Self::Npm,
        Self::Rpm,
        Self::Nuget,
        Self::Go,
        Self::Huggingface,
    ];

    /// Wire representation of the package type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "DOCKER",
            Self::Generic => "GENERIC",
            Self::Helm => "HELM",
            Self::Maven => "MAVEN",
            Self::Python => "PYTHON",
            Self::Npm => "NPM",
            Self::Rpm => "RPM",
            Self::Nuget => "NUGET",
            Self::Go => "GO",
            Self::Huggingface => "HUGGINGFACE",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|package_type| package_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RegistryError::InvalidPackageType(s.to_string()))
    }
}

/// Kind of content held by a Hugging Face style artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    /// Machine learning model
    Model,
    /// Dataset
    Dataset,
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Dataset => write!(f, "dataset"),
        }
    }
}

impl FromStr for ArtifactType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "model" => Ok(Self::Model),
            "dataset" => Ok(Self::Dataset),
            _ => Err(RegistryError::InvalidArtifactType(s.to_string())),
        }
    }
}

/// Outcome tag carried by every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Request completed
    Success,
    /// Request was rejected (client side problem)
    Failure,
    /// Request failed on the server side
    Error,
}

impl Default for Status {
    fn default() -> Self {
        Self::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for Status {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Self::Success),
            "FAILURE" => Ok(Self::Failure),
            "ERROR" => Ok(Self::Error),
            _ => Err(RegistryError::InvalidStatus(s.to_string())),
        }
    }
}

/// Type alias for labels (user-defined classification strings)
pub type Labels = Vec<String>;
