// ABOUTME: Trigger context for a run: repository, commit SHA, and branch.
// ABOUTME: Resolved once from the Actions event payload and explicit overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::{Reference, RepoName, RepoNameError};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read event payload {path}: {source}")]
    ReadPayload {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse event payload {path}: {source}")]
    ParsePayload {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("repository is unknown: pass --repository or set GITHUB_REPOSITORY")]
    MissingRepository,

    #[error("invalid repository: {0}")]
    InvalidRepository(#[from] RepoNameError),
}

/// The subset of a webhook event payload used to find deployments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
    #[serde(default)]
    pub repository: Option<PayloadRepository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub head: Option<PullRequestHead>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestHead {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadRepository {
    #[serde(default)]
    pub full_name: Option<String>,
}

impl EventPayload {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ContextError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContextError::ReadPayload {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ContextError::ParsePayload {
            path: path.to_path_buf(),
            source,
        })
    }

    fn head(&self) -> Option<&PullRequestHead> {
        self.pull_request.as_ref().and_then(|pr| pr.head.as_ref())
    }

    /// Push `after`, else the pull request head SHA.
    pub fn commit(&self) -> Option<&str> {
        self.after
            .as_deref()
            .or_else(|| self.head().and_then(|h| h.sha.as_deref()))
    }

    /// Push `ref`, else the pull request head ref.
    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref
            .as_deref()
            .or_else(|| self.head().and_then(|h| h.git_ref.as_deref()))
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .and_then(|r| r.full_name.as_deref())
    }
}

/// Explicit inputs for building a [`TriggerContext`].
///
/// Blank strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ContextInputs {
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub git_ref: Option<String>,
    pub event_path: Option<PathBuf>,
}

/// Repository and references a run watches. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    pub repository: RepoName,
    pub commit: Reference,
    pub branch: Reference,
}

impl TriggerContext {
    pub fn new(repository: RepoName, commit: Reference, branch: Reference) -> Self {
        Self {
            repository,
            commit,
            branch,
        }
    }

    /// Combine explicit inputs with the event payload; inputs win.
    pub fn resolve(inputs: &ContextInputs) -> Result<Self, ContextError> {
        let payload = match inputs.event_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => EventPayload::load(path)?,
            _ => EventPayload::default(),
        };
        Self::from_parts(inputs, &payload)
    }

    pub fn from_parts(
        inputs: &ContextInputs,
        payload: &EventPayload,
    ) -> Result<Self, ContextError> {
        let repository = non_blank(inputs.repository.as_deref())
            .or_else(|| non_blank(payload.repository()))
            .ok_or(ContextError::MissingRepository)?;
        let repository = RepoName::new(repository)?;

        let commit = non_blank(inputs.sha.as_deref())
            .or_else(|| payload.commit())
            .unwrap_or_default();
        let git_ref = non_blank(inputs.git_ref.as_deref())
            .or_else(|| payload.git_ref())
            .unwrap_or_default();

        Ok(Self {
            repository,
            commit: Reference::commit(commit),
            branch: Reference::branch(git_ref),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
