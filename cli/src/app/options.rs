//! Client configuration options

use std::collections::HashMap;
use std::time::Duration;

use clap::ValueEnum;
use url::Url;

use crate::errors::WatchlyError;
use crate::utils::user_agent;

/// Production Watchly API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.watchly.dev/api/v1";

/// Webhook endpoints exposed by the Watchly API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DeploymentStart,
    DeploymentFinish,
    ProjectSettings,
    DeploymentsEnabled,
    LegacyNotify,
}

/// How the API key is presented to an endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `?api_key=<key>`
    #[value(name = "query")]
    QueryParam,
}

/// Per-endpoint authentication schemes
#[derive(Debug, Clone, Default)]
pub struct AuthPolicy {
    default: AuthScheme,
    overrides: HashMap<Endpoint, AuthScheme>,
}

impl AuthPolicy {
    /// Use the same scheme for every endpoint
    pub fn uniform(scheme: AuthScheme) -> Self {
        Self {
            default: scheme,
            overrides: HashMap::new(),
        }
    }

    /// Override the scheme for a single endpoint
    pub fn with(mut self, endpoint: Endpoint, scheme: AuthScheme) -> Self {
        self.overrides.insert(endpoint, scheme);
        self
    }

    pub fn scheme_for(&self, endpoint: Endpoint) -> AuthScheme {
        self.overrides
            .get(&endpoint)
            .copied()
            .unwrap_or(self.default)
    }
}

/// Options used to construct a [`crate::http::client::WatchlyClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base API URL, without trailing slash
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Authentication scheme per endpoint
    pub auth: AuthPolicy,

    /// User agent header
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            auth: AuthPolicy::default(),
            user_agent: user_agent(),
        }
    }
}

impl ClientOptions {
    /// Default options pointed at another base URL
    pub fn with_base_url(base_url: &str) -> Result<Self, WatchlyError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| WatchlyError::InvalidInput(format!("endpoint {}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(WatchlyError::InvalidInput(format!(
                "endpoint {} is not a base URL",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }
}
