//! Deployment webhooks

use reqwest::Method;
use tracing::info;
use watchly_api::models::{
    DeploymentFinishRequest, DeploymentNotification, DeploymentStartRequest,
    DeploymentStartResponse, DeploymentStatus, ProjectEnabledResponse,
};

use crate::app::options::Endpoint;
use crate::errors::WatchlyError;
use crate::http::client::{decode, SuccessCodes, WatchlyClient};

fn require(name: &str, value: &str) -> Result<(), WatchlyError> {
    if value.trim().is_empty() {
        return Err(WatchlyError::InvalidInput(format!("{} is empty", name)));
    }
    Ok(())
}

/// Commit shas go into the request path and must be non-empty hex
pub fn validate_commit_sha(commit_sha: &str) -> Result<(), WatchlyError> {
    if commit_sha.is_empty() || !commit_sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WatchlyError::InvalidInput(format!(
            "invalid commit sha: {:?}",
            commit_sha
        )));
    }
    Ok(())
}

impl WatchlyClient {
    /// Record the start of a deployment for a commit and return its id
    pub async fn start_deployment(
        &self,
        commit_sha: &str,
        run_url: &str,
        release_tag: Option<&str>,
    ) -> Result<String, WatchlyError> {
        const OPERATION: &str = "start deployment";
        validate_commit_sha(commit_sha)?;
        require("run url", run_url)?;

        let url = self.endpoint_url(&["webhooks", "deployments", "start", commit_sha])?;
        let body = DeploymentStartRequest::new(run_url, release_tag);
        let request = self
            .request(Method::POST, Endpoint::DeploymentStart, url)
            .json(&body);

        let response = self.send(OPERATION, request, SuccessCodes::OkOrCreated).await?;
        let response: DeploymentStartResponse = decode(OPERATION, &response)?;

        info!("Deployment {} started for {}", response.id, commit_sha);
        Ok(response.id)
    }

    /// Record the outcome of a deployment for a commit
    pub async fn finish_deployment(
        &self,
        commit_sha: &str,
        status: DeploymentStatus,
        completed_at: &str,
    ) -> Result<(), WatchlyError> {
        validate_commit_sha(commit_sha)?;
        require("completion time", completed_at)?;

        let url = self.endpoint_url(&["webhooks", "deployments", "finish", commit_sha])?;
        let body = DeploymentFinishRequest {
            status,
            completed_at: completed_at.to_string(),
        };
        let request = self
            .request(Method::POST, Endpoint::DeploymentFinish, url)
            .json(&body);

        self.send("finish deployment", request, SuccessCodes::BelowClientError)
            .await?;

        info!("Deployment for {} finished: {}", commit_sha, status);
        Ok(())
    }

    /// Whether deployments are currently enabled for the project
    pub async fn get_deployments_enabled(&self) -> Result<bool, WatchlyError> {
        const OPERATION: &str = "check deployments enabled";

        let url = self.endpoint_url(&["webhooks", "deployments", "enabled"])?;
        let request = self.request(Method::GET, Endpoint::DeploymentsEnabled, url);

        let response = self.send(OPERATION, request, SuccessCodes::BelowClientError).await?;
        let response: ProjectEnabledResponse = decode(OPERATION, &response)?;
        Ok(response.enabled)
    }

    /// Legacy combined create+finish notification addressed by deployment id
    pub async fn notify_deployment(
        &self,
        notification: &DeploymentNotification,
    ) -> Result<(), WatchlyError> {
        require("deployment id", &notification.id)?;

        let url = self.endpoint_url(&["webhooks", "deployments", "finish"])?;
        let request = self
            .request(Method::POST, Endpoint::LegacyNotify, url)
            .json(notification);

        self.send("notify deployment", request, SuccessCodes::Ok).await?;
        Ok(())
    }
}
