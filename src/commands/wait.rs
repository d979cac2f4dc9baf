// ABOUTME: Wait command implementation.
// ABOUTME: Builds config, context, and client, then races the engine against the timeout.

use crate::cli::Cli;
use deploy_wait::action::ActionReporter;
use deploy_wait::config::Config;
use deploy_wait::context::TriggerContext;
use deploy_wait::error::{Error, Result};
use deploy_wait::github::GitHubClient;
use deploy_wait::output::Output;
use deploy_wait::poll::{self, StabilityEngine, wait_for_deployments};
use std::env;

/// Wait for the deployments of the triggering commit and branch to stabilise.
pub async fn wait(cli: Cli, mut output: Output, reporter: &ActionReporter) -> Result<()> {
    output.start_timer();

    let config = load_config(&cli)?;
    let context = TriggerContext::resolve(&cli.context_inputs())?;

    let token = cli.token();
    if token.is_empty() {
        tracing::warn!("no GitHub token provided; requests are unauthenticated");
    }

    tracing::debug!(?config, "resolved configuration");
    output.progress(&format!(
        "Waiting for deployments of {} (commit: {}, branch: {})",
        context.repository,
        display_or_none(context.commit.as_str()),
        display_or_none(context.branch.as_str()),
    ));
    if let Some(filter) = &config.environment_filter {
        output.progress(&format!("Only environments matching /{filter}/"));
    }

    let client = GitHubClient::new(&config.api_url, context.repository.clone(), token.expose())?;
    let engine = StabilityEngine::new(
        client,
        context,
        config.environment_filter.clone(),
        config.poll_settings(),
    );

    let deployments = wait_for_deployments(engine, config.max_timeout).await?;

    reporter
        .report_success(&deployments)
        .map_err(Error::Report)?;
    output.success(&poll::summary(deployments.len()), &deployments);

    Ok(())
}

/// Defaults, then the config file, then CLI and `INPUT_*` values.
fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = env::current_dir()?;
            Config::discover(&cwd)?.unwrap_or_default()
        }
    };

    Ok(base.with_overrides(cli.config_overrides()?)?)
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() { "<none>" } else { value }
}
