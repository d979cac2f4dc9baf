// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Every input can also come from the matching INPUT_* Actions variable.

use clap::Parser;
use deploy_wait::config::{self, ConfigError, ConfigOverrides, Token};
use deploy_wait::context::ContextInputs;
use deploy_wait::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deploy-wait")]
#[command(about = "Wait until the GitHub deployments for a commit are stable")]
#[command(version)]
pub struct Cli {
    /// Token for the GitHub API
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Total time to wait before failing (e.g. 10m)
    #[arg(long, env = "INPUT_MAX_TIMEOUT", value_name = "DURATION")]
    pub max_timeout: Option<String>,

    /// Delay before re-checking pending deployments (e.g. 1m)
    #[arg(long, env = "INPUT_CHECK_INTERVAL", value_name = "DURATION")]
    pub check_interval: Option<String>,

    /// Delay between consecutive clean confirmations
    #[arg(long, env = "INPUT_CONFIRM_INTERVAL", value_name = "DURATION")]
    pub confirm_interval: Option<String>,

    /// Delay before the first check
    #[arg(long, env = "INPUT_INITIAL_DELAY", value_name = "DURATION")]
    pub initial_delay: Option<String>,

    /// Consecutive clean checks required for success
    #[arg(long, env = "INPUT_REQUIRED_CHECKS", value_name = "COUNT")]
    pub required_checks: Option<String>,

    /// Only consider environments matching this regular expression
    #[arg(long, env = "INPUT_ENVIRONMENT_FILTER", value_name = "REGEX")]
    pub environment_filter: Option<String>,

    /// Handling of deployments found by both commit and branch: dedupe or keep
    #[arg(long, env = "INPUT_DUPLICATES", value_name = "POLICY")]
    pub duplicates: Option<String>,

    /// Handling of inactive deployments: stop-cycle or skip
    #[arg(long, env = "INPUT_ON_INACTIVE", value_name = "POLICY")]
    pub on_inactive: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Commit SHA to watch (defaults to the event payload)
    #[arg(long)]
    pub sha: Option<String>,

    /// Branch or ref to watch (defaults to the event payload)
    #[arg(long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Path to the event payload JSON
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Configuration file (defaults to deploy-wait.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputMode::Normal)]
    pub output: OutputMode,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn token(&self) -> Token {
        Token::new(self.github_token.clone().unwrap_or_default())
    }

    pub fn config_overrides(&self) -> Result<ConfigOverrides, ConfigError> {
        Ok(ConfigOverrides {
            max_timeout: config::parse_duration_input(
                "max_timeout",
                self.max_timeout.as_deref(),
            )?,
            check_interval: config::parse_duration_input(
                "check_interval",
                self.check_interval.as_deref(),
            )?,
            confirm_interval: config::parse_duration_input(
                "confirm_interval",
                self.confirm_interval.as_deref(),
            )?,
            initial_delay: config::parse_duration_input(
                "initial_delay",
                self.initial_delay.as_deref(),
            )?,
            required_checks: parse_count("required_checks", self.required_checks.as_deref())?,
            environment_filter: self.environment_filter.clone(),
            api_url: self.api_url.clone(),
            duplicates: parse_policy(self.duplicates.as_deref())?,
            on_inactive: parse_policy(self.on_inactive.as_deref())?,
        })
    }

    pub fn context_inputs(&self) -> ContextInputs {
        ContextInputs {
            repository: self.repository.clone(),
            sha: self.sha.clone(),
            git_ref: self.git_ref.clone(),
            event_path: self.event_path.clone(),
        }
    }
}

fn parse_count(name: &str, value: Option<&str>) -> Result<Option<u32>, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::Invalid(format!("invalid {name} '{raw}': {e}"))),
    }
}

fn parse_policy<P>(value: Option<&str>) -> Result<Option<P>, ConfigError>
where
    P: std::str::FromStr<Err = String>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(ConfigError::Invalid),
    }
}
