//! Watchly CLI - Entry Point
//!
//! Runs as a CI step and reports deployment events to Watchly.

use clap::Parser;
use tracing::debug;

use watchly_cli::app::cli::Cli;
use watchly_cli::ci::github::GithubContext;
use watchly_cli::commands::{dispatch, CommandContext};
use watchly_cli::logs::{init_logging, LogOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_options = LogOptions {
        log_level: cli.log_level,
        json_format: cli.log_json,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(cli).await {
        eprintln!("watchly-cli - ❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = cli.client_options()?;
    let github = GithubContext::from_env();
    debug!("Running with options: {:?}", options);

    let ctx = CommandContext::new(options, github);
    dispatch(cli.command, &ctx).await
}
