// ABOUTME: Wire models for GitHub deployments and deployment statuses.
// ABOUTME: Only the fields the engine reads are decoded; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::DeploymentId;

/// A deployment record as returned by `GET /repos/{repo}/deployments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Deployment {
    pub fn new(id: u64, environment: impl Into<String>) -> Self {
        Self {
            id: DeploymentId::new(id),
            environment: environment.into(),
            sha: None,
            git_ref: None,
            created_at: None,
        }
    }
}

/// One entry of a deployment's status history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentStatus {
    pub state: DeploymentState,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub environment_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl DeploymentStatus {
    pub fn new(state: DeploymentState) -> Self {
        Self {
            state,
            target_url: None,
            environment_url: None,
            description: None,
            created_at: None,
        }
    }

    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Some(url.into());
        self
    }

    /// The link to surface for this status: `target_url`, else `environment_url`.
    pub fn url(&self) -> Option<&str> {
        [&self.target_url, &self.environment_url]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.is_empty())
    }
}

/// Lifecycle state of a deployment status.
///
/// Unrecognised states are kept verbatim in `Other` so they round-trip into
/// the step output unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentState {
    Success,
    Pending,
    Failure,
    Inactive,
    Error,
    Queued,
    InProgress,
    Other(String),
}

impl DeploymentState {
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentState::Success => "success",
            DeploymentState::Pending => "pending",
            DeploymentState::Failure => "failure",
            DeploymentState::Inactive => "inactive",
            DeploymentState::Error => "error",
            DeploymentState::Queued => "queued",
            DeploymentState::InProgress => "in_progress",
            DeploymentState::Other(s) => s,
        }
    }
}

impl From<String> for DeploymentState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => DeploymentState::Success,
            "pending" => DeploymentState::Pending,
            "failure" => DeploymentState::Failure,
            "inactive" => DeploymentState::Inactive,
            "error" => DeploymentState::Error,
            "queued" => DeploymentState::Queued,
            "in_progress" => DeploymentState::InProgress,
            _ => DeploymentState::Other(value),
        }
    }
}

impl From<DeploymentState> for String {
    fn from(value: DeploymentState) -> Self {
        match value {
            DeploymentState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
