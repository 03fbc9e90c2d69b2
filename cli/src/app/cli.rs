//! Command-line arguments

use clap::{Args, Parser, Subcommand};

use crate::app::options::{AuthPolicy, AuthScheme, ClientOptions, DEFAULT_BASE_URL};
use crate::errors::WatchlyError;
use crate::logs::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "watchly-cli")]
#[command(about = "CLI to interact with Watchly - Docs at https://docs.watchly.dev")]
#[command(version)]
pub struct Cli {
    /// Watchly API base URL
    #[arg(long, global = true, env = "WATCHLY_ENDPOINT", default_value = DEFAULT_BASE_URL, hide = true)]
    pub endpoint: String,

    /// How the API key is sent: Authorization header or api_key query parameter
    #[arg(long, global = true, env = "WATCHLY_AUTH_SCHEME", value_enum, default_value = "bearer", hide = true)]
    pub auth_scheme: AuthScheme,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, global = true, env = "WATCHLY_LOG_LEVEL", value_enum, ignore_case = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client options for the endpoint and auth scheme given on the command line
    pub fn client_options(&self) -> Result<ClientOptions, WatchlyError> {
        Ok(ClientOptions {
            auth: AuthPolicy::uniform(self.auth_scheme),
            ..ClientOptions::with_base_url(&self.endpoint)?
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Notify Watchly about a deployment
    #[command(subcommand)]
    Deployment(DeploymentCommand),

    /// Change project settings
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Print version and build information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum DeploymentCommand {
    /// Start a deployment
    Start {
        #[command(flatten)]
        auth: ApiKeyArgs,

        /// Release tag of the deployed version
        #[arg(short, long, env = "WATCHLY_RELEASE_TAG")]
        release_tag: Option<String>,

        /// Commit being deployed (defaults to GITHUB_SHA)
        #[arg(long)]
        commit_sha: Option<String>,

        /// CI run URL (defaults to the current GitHub Actions run)
        #[arg(long)]
        run_url: Option<String>,
    },

    /// Finish a deployment
    Finish {
        #[command(flatten)]
        auth: ApiKeyArgs,

        /// Status of the deployment, one of 'successful' or 'failed'
        #[arg(short, long, env = "WATCHLY_STATUS")]
        status: String,

        /// Completion time of the deployment (ISO-8601, defaults to now)
        #[arg(short, long, env = "WATCHLY_COMPLETED_AT")]
        completed_at: Option<String>,

        /// Commit that was deployed (defaults to GITHUB_SHA)
        #[arg(long)]
        commit_sha: Option<String>,
    },

    /// Check whether deployments are enabled for the project
    Enabled {
        #[command(flatten)]
        auth: ApiKeyArgs,
    },

    /// Send the legacy combined deployment notification
    Notify {
        #[command(flatten)]
        auth: ApiKeyArgs,

        /// ID of the deployment to notify Watchly about
        #[arg(short, long, env = "WATCHLY_DEPLOYMENT_ID")]
        deployment_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Block further deployments
    Freeze {
        #[command(flatten)]
        auth: ApiKeyArgs,
    },

    /// Allow deployments again
    Unfreeze {
        #[command(flatten)]
        auth: ApiKeyArgs,
    },
}

#[derive(Debug, Args)]
pub struct ApiKeyArgs {
    /// Watchly API key for your project
    #[arg(short = 'k', long, env = "WATCHLY_API_KEY", hide_env_values = true)]
    pub api_key: String,
}
