// ABOUTME: The seam between the polling engine and the hosting platform.
// ABOUTME: Lists deployments for a reference and reads a deployment's latest status.

use async_trait::async_trait;
use std::sync::Arc;

use super::error::ApiError;
use super::models::{Deployment, DeploymentStatus};
use crate::types::{DeploymentId, Reference};

/// Read-only access to deployment records.
#[async_trait]
pub trait DeploymentSource: Send + Sync {
    /// Deployments pointing at `reference`, in platform order.
    ///
    /// Implementations are only called with non-empty references.
    async fn list_deployments(&self, reference: &Reference) -> Result<Vec<Deployment>, ApiError>;

    /// The most recent status entry, or `None` when the history is empty.
    async fn latest_status(&self, id: DeploymentId) -> Result<Option<DeploymentStatus>, ApiError>;
}

#[async_trait]
impl<T: DeploymentSource + ?Sized> DeploymentSource for Arc<T> {
    async fn list_deployments(&self, reference: &Reference) -> Result<Vec<Deployment>, ApiError> {
        (**self).list_deployments(reference).await
    }

    async fn latest_status(&self, id: DeploymentId) -> Result<Option<DeploymentStatus>, ApiError> {
        (**self).latest_status(id).await
    }
}
