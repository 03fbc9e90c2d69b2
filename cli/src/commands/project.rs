//! `project` subcommands

use anyhow::Context;

use crate::app::cli::ApiKeyArgs;
use crate::commands::{progress, success, CommandContext};

/// Freeze or unfreeze deployments for the project
pub async fn set_freeze(ctx: &CommandContext, auth: &ApiKeyArgs, frozen: bool) -> anyhow::Result<()> {
    let client = ctx.client(auth)?;

    progress("Contacting Watchly ...");
    client
        .set_deployment_freeze(frozen)
        .await
        .context("failed to update Watchly project settings")?;

    if frozen {
        success("Deployments frozen");
    } else {
        success("Deployments unfrozen");
    }

    Ok(())
}
