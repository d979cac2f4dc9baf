// ABOUTME: Application-wide error type for deploy-wait.
// ABOUTME: Wraps configuration, context, API, wait, and reporting failures.

use thiserror::Error;

use crate::config::ConfigError;
use crate::context::ContextError;
use crate::github::ApiError;
use crate::poll::WaitError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error("failed to write step output: {0}")]
    Report(std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
