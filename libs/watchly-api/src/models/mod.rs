//! API models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deployment start request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStartRequest {
    /// URL of the CI run performing the deployment
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_tag: Option<String>,
}

impl DeploymentStartRequest {
    /// Build a start request. A blank release tag is dropped, any other tag is sent as given.
    pub fn new(url: impl Into<String>, release_tag: Option<&str>) -> Self {
        Self {
            url: url.into(),
            release_tag: release_tag
                .filter(|tag| !tag.trim().is_empty())
                .map(str::to_string),
        }
    }
}

/// Deployment start response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStartResponse {
    pub id: String,
}

/// Final status of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Successful,
    Failed,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Successful => "successful",
            DeploymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "successful" => Ok(DeploymentStatus::Successful),
            "failed" => Ok(DeploymentStatus::Failed),
            _ => Err(format!(
                "invalid status: {} (expected 'successful' or 'failed')",
                s
            )),
        }
    }
}

/// Deployment finish request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentFinishRequest {
    pub status: DeploymentStatus,

    /// ISO-8601 completion timestamp
    pub completed_at: String,
}

/// Project settings update. A `None` field is left unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_freeze: Option<bool>,
}

impl ProjectSettingsRequest {
    pub fn freeze(frozen: bool) -> Self {
        Self {
            deployment_freeze: Some(frozen),
        }
    }
}

/// Project settings as echoed by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettingsResponse {
    #[serde(default)]
    pub deployment_freeze: Option<bool>,
}

/// Deployments enabled response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEnabledResponse {
    pub enabled: bool,
}

/// Legacy combined create+finish notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentNotification {
    pub id: String,
    pub github_run_id: String,
    pub github_job_id: String,
    pub commit_sha: String,
    pub commit_author: String,
}
