//! GitHub Actions run context

use std::path::PathBuf;

use crate::errors::WatchlyError;

pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const GITHUB_SHA: &str = "GITHUB_SHA";
pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";
pub const GITHUB_JOB: &str = "GITHUB_JOB";
pub const GITHUB_ACTOR: &str = "GITHUB_ACTOR";
pub const GITHUB_SERVER_URL: &str = "GITHUB_SERVER_URL";
pub const GITHUB_ENV: &str = "GITHUB_ENV";

const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Values GitHub Actions exposes to a workflow step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubContext {
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub run_id: Option<String>,
    pub job: Option<String>,
    pub actor: Option<String>,
    pub server_url: Option<String>,
    pub env_file: Option<PathBuf>,
}

impl GithubContext {
    /// Read the context from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the context through a lookup function. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            repository: get(GITHUB_REPOSITORY),
            sha: get(GITHUB_SHA),
            run_id: get(GITHUB_RUN_ID),
            job: get(GITHUB_JOB),
            actor: get(GITHUB_ACTOR),
            server_url: get(GITHUB_SERVER_URL),
            env_file: get(GITHUB_ENV).map(PathBuf::from),
        }
    }

    pub fn sha(&self) -> Result<&str, WatchlyError> {
        required(&self.sha, GITHUB_SHA)
    }

    pub fn run_id(&self) -> Result<&str, WatchlyError> {
        required(&self.run_id, GITHUB_RUN_ID)
    }

    pub fn job(&self) -> Result<&str, WatchlyError> {
        required(&self.job, GITHUB_JOB)
    }

    /// URL of the current workflow run
    pub fn run_url(&self) -> Result<String, WatchlyError> {
        let repository = required(&self.repository, GITHUB_REPOSITORY)?;
        let run_id = self.run_id()?;
        let server_url = self
            .server_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/');

        Ok(format!(
            "{}/{}/actions/runs/{}",
            server_url, repository, run_id
        ))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, WatchlyError> {
    value.as_deref().ok_or_else(|| {
        WatchlyError::MissingEnv(format!(
            "{} is not set, are you running this in a GitHub Actions environment?",
            name
        ))
    })
}
