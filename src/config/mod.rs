// ABOUTME: Configuration for a deployment wait: timings, filter, API endpoint, policies.
// ABOUTME: Layers built-in defaults, an optional YAML file, then CLI/env overrides.

mod error;
mod filter;
mod token;

pub use error::ConfigError;
pub use filter::EnvironmentFilter;
pub use token::Token;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::DEFAULT_API_URL;
use crate::poll::{DuplicatePolicy, InactivePolicy, PollSettings};

pub const CONFIG_FILENAME: &str = "deploy-wait.yml";
pub const CONFIG_FILENAME_ALT: &str = "deploy-wait.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".github/deploy-wait.yml";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Total time allowed before the run is failed.
    #[serde(default = "default_max_timeout", with = "humantime_serde")]
    pub max_timeout: Duration,

    /// Delay after a cycle that was not clean.
    #[serde(default = "default_check_interval", with = "humantime_serde")]
    pub check_interval: Duration,

    /// Delay between consecutive clean confirmations.
    #[serde(default = "default_confirm_interval", with = "humantime_serde")]
    pub confirm_interval: Duration,

    #[serde(default, with = "humantime_serde")]
    pub initial_delay: Duration,

    #[serde(default = "default_required_checks")]
    pub required_checks: u32,

    #[serde(default, deserialize_with = "filter::deserialize_filter")]
    pub environment_filter: Option<EnvironmentFilter>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    #[serde(default)]
    pub on_inactive: InactivePolicy,
}

fn default_max_timeout() -> Duration {
    Duration::from_secs(10 * 60)
}

fn default_check_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_confirm_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_required_checks() -> u32 {
    3
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_timeout: default_max_timeout(),
            check_interval: default_check_interval(),
            confirm_interval: default_confirm_interval(),
            initial_delay: Duration::ZERO,
            required_checks: default_required_checks(),
            environment_filter: None,
            api_url: default_api_url(),
            duplicates: DuplicatePolicy::default(),
            on_inactive: InactivePolicy::default(),
        }
    }
}

/// Values supplied on the command line or through `INPUT_*` variables.
///
/// `None` leaves the underlying value alone. A blank filter is treated as
/// unset because the Actions runner passes empty strings for omitted inputs.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_timeout: Option<Duration>,
    pub check_interval: Option<Duration>,
    pub confirm_interval: Option<Duration>,
    pub initial_delay: Option<Duration>,
    pub required_checks: Option<u32>,
    pub environment_filter: Option<String>,
    pub api_url: Option<String>,
    pub duplicates: Option<DuplicatePolicy>,
    pub on_inactive: Option<InactivePolicy>,
}

/// Parse a human-readable duration input such as `30s` or `1m 30s`.
///
/// Blank input is `None`.
pub fn parse_duration_input(name: &str, value: Option<&str>) -> Result<Option<Duration>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => humantime::parse_duration(raw)
            .map(Some)
            .map_err(|e| ConfigError::Invalid(format!("invalid {name} '{raw}': {e}"))),
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(ConfigError::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, if any.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates: [PathBuf; 3] = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading configuration file");
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }

    /// Apply overrides on top of this config and validate the result.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(v) = overrides.max_timeout {
            self.max_timeout = v;
        }
        if let Some(v) = overrides.check_interval {
            self.check_interval = v;
        }
        if let Some(v) = overrides.confirm_interval {
            self.confirm_interval = v;
        }
        if let Some(v) = overrides.initial_delay {
            self.initial_delay = v;
        }
        if let Some(v) = overrides.required_checks {
            self.required_checks = v;
        }
        let filter = EnvironmentFilter::parse_optional(overrides.environment_filter.as_deref())?;
        if filter.is_some() {
            self.environment_filter = filter;
        }
        if let Some(url) = overrides.api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(v) = overrides.duplicates {
            self.duplicates = v;
        }
        if let Some(v) = overrides.on_inactive {
            self.on_inactive = v;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.required_checks == 0 {
            return Err(ConfigError::Invalid(
                "required_checks must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("max_timeout", self.max_timeout),
            ("check_interval", self.check_interval),
            ("confirm_interval", self.confirm_interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_url must be an http(s) URL: {}",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Engine timings and policies derived from this config.
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            required_checks: self.required_checks,
            check_interval: self.check_interval,
            confirm_interval: self.confirm_interval,
            initial_delay: self.initial_delay,
            duplicates: self.duplicates,
            on_inactive: self.on_inactive,
        }
    }
}
