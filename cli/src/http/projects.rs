//! Project settings webhook

use reqwest::Method;
use tracing::{debug, info};
use watchly_api::models::{ProjectSettingsRequest, ProjectSettingsResponse};

use crate::app::options::Endpoint;
use crate::errors::WatchlyError;
use crate::http::client::{decode, SuccessCodes, WatchlyClient};

impl WatchlyClient {
    /// Update project settings. Returns the server echo when it could be decoded.
    pub async fn update_project_settings(
        &self,
        settings: &ProjectSettingsRequest,
    ) -> Result<Option<ProjectSettingsResponse>, WatchlyError> {
        const OPERATION: &str = "update project settings";

        let url = self.endpoint_url(&["webhooks", "projects"])?;
        let request = self
            .request(Method::PUT, Endpoint::ProjectSettings, url)
            .json(settings);

        let response = self.send(OPERATION, request, SuccessCodes::BelowClientError).await?;
        info!("Project settings updated: {:?}", settings);

        // The echo is informational; success is decided by the status alone.
        match decode::<ProjectSettingsResponse>(OPERATION, &response) {
            Ok(echo) => Ok(Some(echo)),
            Err(e) => {
                debug!("Ignoring project settings response: {}", e);
                Ok(None)
            }
        }
    }

    /// Freeze or unfreeze deployments for the project
    pub async fn set_deployment_freeze(&self, frozen: bool) -> Result<(), WatchlyError> {
        self.update_project_settings(&ProjectSettingsRequest::freeze(frozen))
            .await?;
        Ok(())
    }
}
