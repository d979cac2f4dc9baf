// ABOUTME: GitHub deployments API access.
// ABOUTME: Exposes the DeploymentSource seam, its reqwest implementation, and wire models.

mod client;
mod error;
mod models;
mod source;

pub use client::{DEFAULT_API_URL, DEPLOYMENTS_PAGE_SIZE, GitHubClient};
pub use error::ApiError;
pub use models::{Deployment, DeploymentState, DeploymentStatus};
pub use source::DeploymentSource;
