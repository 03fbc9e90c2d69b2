//! HTTP client implementation

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::app::options::{AuthPolicy, AuthScheme, ClientOptions, Endpoint};
use crate::errors::WatchlyError;

/// Status codes an operation accepts as success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCodes {
    /// 200 only
    Ok,
    /// 200 or 201
    OkOrCreated,
    /// anything below 400
    BelowClientError,
}

impl SuccessCodes {
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            SuccessCodes::Ok => status == StatusCode::OK,
            SuccessCodes::OkOrCreated => {
                status == StatusCode::OK || status == StatusCode::CREATED
            }
            SuccessCodes::BelowClientError => status.as_u16() < 400,
        }
    }
}

/// HTTP client for the Watchly webhook API
pub struct WatchlyClient {
    client: Client,
    base_url: Url,
    auth: AuthPolicy,
    api_key: SecretString,
}

impl WatchlyClient {
    /// Create a new client for the given API key
    pub fn new(options: ClientOptions, api_key: SecretString) -> Result<Self, WatchlyError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(WatchlyError::InvalidInput("API key is empty".to_string()));
        }

        let base_url = Url::parse(&options.base_url).map_err(|e| {
            WatchlyError::InvalidInput(format!("endpoint {}: {}", options.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth: options.auth,
            api_key,
        })
    }

    /// Resolve path segments below the base URL. Segments are percent-encoded.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, WatchlyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                WatchlyError::InvalidInput(format!("endpoint {} is not a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request with the endpoint's authentication applied
    pub(crate) fn request(&self, method: Method, endpoint: Endpoint, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);

        let request = self.client.request(method, url);
        match self.auth.scheme_for(endpoint) {
            AuthScheme::Bearer => request.bearer_auth(self.api_key.expose_secret()),
            AuthScheme::QueryParam => request.query(&[("api_key", self.api_key.expose_secret())]),
        }
    }

    /// Send a request and return the raw response body when the status is accepted
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        success: SuccessCodes,
    ) -> Result<String, WatchlyError> {
        let response = request.send().await?;
        let status = response.status();

        if !success.accepts(status) {
            let body = response.text().await.unwrap_or_default();
            error!("{} failed: {} - {}", operation, status, body);
            return Err(WatchlyError::UnexpectedStatus {
                operation,
                status: status.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("{} succeeded: {}", operation, status);
        Ok(body)
    }
}

/// Decode a JSON response body
pub(crate) fn decode<T: DeserializeOwned>(
    operation: &'static str,
    body: &str,
) -> Result<T, WatchlyError> {
    serde_json::from_str(body).map_err(|source| WatchlyError::Decode { operation, source })
}
