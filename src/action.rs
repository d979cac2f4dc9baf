// ABOUTME: Reports the verdict back to a GitHub Actions runner.
// ABOUTME: Writes step outputs to the GITHUB_OUTPUT file and emits ::error:: commands.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::poll::SimplifiedDeployment;

/// Name of the step output carrying the deployment list.
pub const DEPLOYMENTS_OUTPUT: &str = "deployments";

/// Talks to the Actions runner through its file and stdout protocols.
#[derive(Debug, Clone, Default)]
pub struct ActionReporter {
    enabled: bool,
    output_file: Option<PathBuf>,
}

impl ActionReporter {
    pub fn new(enabled: bool, output_file: Option<PathBuf>) -> Self {
        Self {
            enabled,
            output_file,
        }
    }

    /// Enabled when `GITHUB_ACTIONS=true`; outputs go to `GITHUB_OUTPUT`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(enabled, output_file)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Publish the stable deployment list as the `deployments` output.
    pub fn report_success(&self, deployments: &[SimplifiedDeployment]) -> io::Result<()> {
        let Some(path) = &self.output_file else {
            tracing::debug!("GITHUB_OUTPUT not set, skipping step output");
            return Ok(());
        };
        let json = serde_json::to_string(deployments)?;
        append_output(path, DEPLOYMENTS_OUTPUT, &json)
    }

    /// Mark the step failed with `reason`.
    pub fn report_failure(&self, reason: &str) {
        if self.enabled {
            println!("{}", error_command(reason));
        }
    }
}

/// Append `name` using the multi-line delimiter syntax.
pub fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let delimiter = unique_delimiter(value);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{name}<<{delimiter}")?;
    writeln!(file, "{value}")?;
    writeln!(file, "{delimiter}")?;
    Ok(())
}

fn unique_delimiter(value: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut delimiter = format!("ghadelimiter_{}_{nanos}", std::process::id());
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}

/// `::error::` workflow command with the message escaped.
pub fn error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
