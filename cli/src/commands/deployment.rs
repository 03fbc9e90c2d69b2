//! `deployment` subcommands

use anyhow::Context;
use watchly_api::models::{DeploymentNotification, DeploymentStatus};

use crate::app::cli::ApiKeyArgs;
use crate::commands::{notice, progress, success, CommandContext};
use crate::errors::WatchlyError;
use crate::utils::now_rfc3339;

/// Variable later steps read the deployment id from
pub const DEPLOYMENT_ID_VAR: &str = "WATCHLY_DEPLOYMENT_ID";

/// Variable later steps read the enabled flag from
pub const DEPLOYMENTS_ENABLED_VAR: &str = "WATCHLY_DEPLOYMENTS_ENABLED";

/// Start a deployment and export its id
pub async fn start(
    ctx: &CommandContext,
    auth: &ApiKeyArgs,
    release_tag: Option<String>,
    commit_sha: Option<String>,
    run_url: Option<String>,
) -> anyhow::Result<String> {
    let commit_sha = match commit_sha {
        Some(sha) => sha,
        None => ctx.github.sha()?.to_string(),
    };
    let run_url = match run_url {
        Some(url) => url,
        None => ctx.github.run_url()?,
    };
    let client = ctx.client(auth)?;

    progress("Contacting Watchly ...");
    let deployment_id = client
        .start_deployment(&commit_sha, &run_url, release_tag.as_deref())
        .await
        .context("failed to notify Watchly")?;
    success(&format!("Recorded deployment: {}", deployment_id));

    let exported = ctx
        .env_file()
        .export(DEPLOYMENT_ID_VAR, &deployment_id)
        .await
        .context("failed to write to GITHUB_ENV file")?;
    if exported {
        success(&format!(
            "Set {} environment variable for subsequent steps",
            DEPLOYMENT_ID_VAR
        ));
    } else {
        notice(&format!(
            "GITHUB_ENV not set - skipping environment file update. {} will not be available in subsequent steps.",
            DEPLOYMENT_ID_VAR
        ));
    }

    Ok(deployment_id)
}

/// Validate finish inputs without touching the network
pub fn parse_finish_input(
    status: &str,
    completed_at: Option<String>,
) -> Result<(DeploymentStatus, String), WatchlyError> {
    let status = status.parse().map_err(WatchlyError::InvalidInput)?;

    let completed_at = match completed_at.filter(|value| !value.trim().is_empty()) {
        Some(value) => {
            if !is_iso8601(&value) {
                return Err(WatchlyError::InvalidInput(format!(
                    "invalid completion time {}: expected an ISO-8601 date or date-time",
                    value
                )));
            }
            value
        }
        None => now_rfc3339(),
    };

    Ok((status, completed_at))
}

/// ISO-8601 layouts accepted for a completion time, without offset
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
];

/// ISO-8601 layouts accepted for a completion time, with offset
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y%m%dT%H%M%S%z"];

/// Whether `value` is an ISO-8601 date or date-time. The string is forwarded as given.
fn is_iso8601(value: &str) -> bool {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(naive, format).is_ok())
        || OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|format| DateTime::parse_from_str(value, format).is_ok())
        || ["%Y-%m-%d", "%Y%m%d"]
            .iter()
            .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

/// Report the outcome of a deployment
pub async fn finish(
    ctx: &CommandContext,
    auth: &ApiKeyArgs,
    status: &str,
    completed_at: Option<String>,
    commit_sha: Option<String>,
) -> anyhow::Result<()> {
    let (status, completed_at) = parse_finish_input(status, completed_at)?;
    let commit_sha = match commit_sha {
        Some(sha) => sha,
        None => ctx.github.sha()?.to_string(),
    };
    let client = ctx.client(auth)?;

    progress("Contacting Watchly ...");
    client
        .finish_deployment(&commit_sha, status, &completed_at)
        .await
        .context("failed to notify Watchly")?;
    success("Finished deployment");

    Ok(())
}

/// Print whether deployments are enabled and export the flag
pub async fn enabled(ctx: &CommandContext, auth: &ApiKeyArgs) -> anyhow::Result<bool> {
    let client = ctx.client(auth)?;

    let enabled = client
        .get_deployments_enabled()
        .await
        .context("failed to query Watchly")?;
    if enabled {
        success("Deployments are enabled");
    } else {
        notice("Deployments are frozen");
    }

    ctx.env_file()
        .export(DEPLOYMENTS_ENABLED_VAR, &enabled.to_string())
        .await
        .context("failed to write to GITHUB_ENV file")?;

    Ok(enabled)
}

/// Send the legacy combined notification
pub async fn notify(
    ctx: &CommandContext,
    auth: &ApiKeyArgs,
    deployment_id: &str,
) -> anyhow::Result<()> {
    let notification = DeploymentNotification {
        id: deployment_id.to_string(),
        github_run_id: ctx.github.run_id()?.to_string(),
        github_job_id: ctx.github.job()?.to_string(),
        commit_sha: ctx.github.sha()?.to_string(),
        commit_author: ctx.github.actor.clone().unwrap_or_default(),
    };
    let client = ctx.client(auth)?;

    progress("Contacting Watchly ...");
    client
        .notify_deployment(&notification)
        .await
        .context("failed to notify Watchly")?;
    success(&format!("Notified deployment: {}", deployment_id));

    Ok(())
}
