//! Subcommand implementations

pub mod deployment;
pub mod project;

use anyhow::Context;
use colored::Colorize;
use secrecy::SecretString;

use crate::app::cli::{ApiKeyArgs, Commands, DeploymentCommand, ProjectCommand};
use crate::app::options::ClientOptions;
use crate::ci::env_file::EnvFile;
use crate::ci::github::GithubContext;
use crate::errors::WatchlyError;
use crate::http::client::WatchlyClient;
use crate::utils::version_info;

/// Everything a command needs besides its own flags
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub options: ClientOptions,
    pub github: GithubContext,
}

impl CommandContext {
    pub fn new(options: ClientOptions, github: GithubContext) -> Self {
        Self { options, github }
    }

    /// Build a client for the API key given on the command line
    pub fn client(&self, auth: &ApiKeyArgs) -> Result<WatchlyClient, WatchlyError> {
        WatchlyClient::new(
            self.options.clone(),
            SecretString::from(auth.api_key.clone()),
        )
    }

    pub fn env_file(&self) -> EnvFile {
        EnvFile::new(self.github.env_file.clone())
    }
}

/// Run a parsed command
pub async fn dispatch(command: Commands, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Commands::Deployment(DeploymentCommand::Start {
            auth,
            release_tag,
            commit_sha,
            run_url,
        }) => {
            deployment::start(ctx, &auth, release_tag, commit_sha, run_url).await?;
        }
        Commands::Deployment(DeploymentCommand::Finish {
            auth,
            status,
            completed_at,
            commit_sha,
        }) => {
            deployment::finish(ctx, &auth, &status, completed_at, commit_sha).await?;
        }
        Commands::Deployment(DeploymentCommand::Enabled { auth }) => {
            deployment::enabled(ctx, &auth).await?;
        }
        Commands::Deployment(DeploymentCommand::Notify {
            auth,
            deployment_id,
        }) => {
            deployment::notify(ctx, &auth, &deployment_id).await?;
        }
        Commands::Project(ProjectCommand::Freeze { auth }) => {
            project::set_freeze(ctx, &auth, true).await?;
        }
        Commands::Project(ProjectCommand::Unfreeze { auth }) => {
            project::set_freeze(ctx, &auth, false).await?;
        }
        Commands::Version => {
            let version = serde_json::to_string_pretty(&version_info())
                .context("failed to render version info")?;
            println!("{}", version);
        }
    }

    Ok(())
}

pub(crate) fn progress(message: &str) {
    println!("watchly-cli - 🔭 {}", message);
}

pub(crate) fn success(message: &str) {
    println!("watchly-cli - ✅ {}", message.green());
}

pub(crate) fn notice(message: &str) {
    println!("watchly-cli - {}", message.yellow());
}
