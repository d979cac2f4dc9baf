// ABOUTME: In-memory DeploymentSource with scripted deployments and status sequences.
// ABOUTME: Records every call so tests can assert what the engine asked for.

use async_trait::async_trait;
use deploy_wait::github::{
    ApiError, Deployment, DeploymentSource, DeploymentState, DeploymentStatus,
};
use deploy_wait::types::{DeploymentId, Reference};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

#[derive(Default)]
struct Script {
    deployments: HashMap<String, Vec<Deployment>>,
    statuses: HashMap<DeploymentId, VecDeque<Option<DeploymentStatus>>>,
    list_error: Option<(u16, String)>,
    list_calls: Vec<String>,
    status_calls: Vec<DeploymentId>,
}

/// Cloning shares the script, so a test can keep a handle after moving one into the engine.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    script: Arc<Mutex<Script>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deployments returned for `reference` on every lookup.
    pub fn deployments(self, reference: &str, deployments: Vec<Deployment>) -> Self {
        self.script
            .lock()
            .deployments
            .insert(reference.to_string(), deployments);
        self
    }

    /// Latest states returned for `id`, one per lookup; the last one repeats.
    /// `None` means an empty status history.
    pub fn states(self, id: u64, states: Vec<Option<DeploymentState>>) -> Self {
        let statuses = states
            .into_iter()
            .map(|s| {
                s.map(|state| {
                    DeploymentStatus::new(state)
                        .with_target_url(format!("https://deploy.example.com/{id}"))
                })
            })
            .collect();
        self.script
            .lock()
            .statuses
            .insert(DeploymentId::new(id), statuses);
        self
    }

    /// Same state on every lookup.
    pub fn state(self, id: u64, state: DeploymentState) -> Self {
        self.states(id, vec![Some(state)])
    }

    /// Fail every deployment listing with this HTTP status.
    pub fn failing_list(self, status: u16, message: &str) -> Self {
        self.script.lock().list_error = Some((status, message.to_string()));
        self
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.script.lock().list_calls.clone()
    }

    pub fn status_calls(&self) -> Vec<u64> {
        self.script
            .lock()
            .status_calls
            .iter()
            .map(|id| id.get())
            .collect()
    }
}

#[async_trait]
impl DeploymentSource for ScriptedSource {
    async fn list_deployments(&self, reference: &Reference) -> Result<Vec<Deployment>, ApiError> {
        let mut script = self.script.lock();
        script.list_calls.push(reference.as_str().to_string());
        if let Some((status, message)) = &script.list_error {
            return Err(ApiError::status(*status, message.clone()));
        }
        Ok(script
            .deployments
            .get(reference.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn latest_status(&self, id: DeploymentId) -> Result<Option<DeploymentStatus>, ApiError> {
        let mut script = self.script.lock();
        script.status_calls.push(id);
        let Some(queue) = script.statuses.get_mut(&id) else {
            return Ok(None);
        };
        let next = if queue.len() > 1 {
            queue.pop_front().flatten()
        } else {
            queue.front().cloned().flatten()
        };
        Ok(next)
    }
}
