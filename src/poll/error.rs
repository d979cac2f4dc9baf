// ABOUTME: Unified outcome error for a deployment wait, SNAFU style.
// ABOUTME: Deployment failure, timeout, upstream API error, or an aborted poll task.

use snafu::Snafu;
use std::time::Duration;

use super::seconds;
use crate::github::ApiError;

/// Why a wait ended without a stable result.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum WaitError {
    /// A deployment's latest status was `failure`.
    #[snafu(display("{environment} failed."))]
    DeploymentFailed { environment: String },

    /// The overall time budget ran out first.
    #[snafu(display(
        "Timed out after {} seconds of waiting for deployments",
        seconds(*after)
    ))]
    TimedOut { after: Duration },

    /// The platform API call failed.
    #[snafu(display("{source}"))]
    Api { source: ApiError },

    /// The poll task ended without producing a result.
    #[snafu(display("deployment check aborted: {message}"))]
    Aborted { message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitErrorKind {
    DeploymentFailed,
    TimedOut,
    Api,
    Aborted,
}

impl WaitError {
    pub fn kind(&self) -> WaitErrorKind {
        match self {
            WaitError::DeploymentFailed { .. } => WaitErrorKind::DeploymentFailed,
            WaitError::TimedOut { .. } => WaitErrorKind::TimedOut,
            WaitError::Api { .. } => WaitErrorKind::Api,
            WaitError::Aborted { .. } => WaitErrorKind::Aborted,
        }
    }

    /// The environment that failed, if this is a deployment failure.
    pub fn failed_environment(&self) -> Option<&str> {
        match self {
            WaitError::DeploymentFailed { environment } => Some(environment),
            _ => None,
        }
    }
}

impl From<ApiError> for WaitError {
    fn from(source: ApiError) -> Self {
        WaitError::Api { source }
    }
}
