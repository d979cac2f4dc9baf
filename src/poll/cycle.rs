// ABOUTME: One poll cycle: fetch by commit and branch, filter, resolve statuses, classify.
// ABOUTME: Stops at the first failure; inactive handling follows the configured policy.

use serde::Serialize;
use std::collections::HashSet;

use super::error::{DeploymentFailedSnafu, WaitError};
use super::policy::{DuplicatePolicy, InactivePolicy};
use crate::config::EnvironmentFilter;
use crate::context::TriggerContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::github::{ApiError, Deployment, DeploymentSource, DeploymentState};
use crate::types::Reference;

/// The engine's output unit: one deployment and its latest state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifiedDeployment {
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `None` when the deployment has no status yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DeploymentState>,
}

impl SimplifiedDeployment {
    pub fn is_success(&self) -> bool {
        self.state == Some(DeploymentState::Success)
    }
}

/// Everything one cycle observed.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub deployments: Vec<SimplifiedDeployment>,
    /// An inactive status stopped the cycle before every deployment was checked.
    pub truncated: bool,
    pub diagnostics: Diagnostics,
}

impl CycleReport {
    /// Every gathered deployment is exactly `success`. An empty cycle is clean.
    pub fn is_clean(&self) -> bool {
        self.deployments.iter().all(SimplifiedDeployment::is_success)
    }
}

/// Deployments for `reference`; an empty reference is never sent to the platform.
pub async fn fetch_deployments<S>(
    source: &S,
    reference: &Reference,
) -> Result<Vec<Deployment>, ApiError>
where
    S: DeploymentSource + ?Sized,
{
    if reference.is_empty() {
        tracing::debug!(kind = %reference.kind(), "reference unavailable, skipping lookup");
        return Ok(Vec::new());
    }
    source.list_deployments(reference).await
}

/// Inputs a cycle reads but never changes.
pub(crate) struct CycleInputs<'a> {
    pub context: &'a TriggerContext,
    pub filter: Option<&'a EnvironmentFilter>,
    pub duplicates: DuplicatePolicy,
    pub on_inactive: InactivePolicy,
}

/// Commit results followed by branch results, filtered and de-duplicated.
async fn candidates<S>(source: &S, inputs: &CycleInputs<'_>) -> Result<Vec<Deployment>, ApiError>
where
    S: DeploymentSource + ?Sized,
{
    let (by_commit, by_branch) = futures::try_join!(
        fetch_deployments(source, &inputs.context.commit),
        fetch_deployments(source, &inputs.context.branch),
    )?;

    let mut seen = HashSet::new();
    let deployments = by_commit
        .into_iter()
        .chain(by_branch)
        .filter(|d| inputs.filter.is_none_or(|f| f.matches(&d.environment)))
        .filter(|d| match inputs.duplicates {
            DuplicatePolicy::Keep => true,
            DuplicatePolicy::Dedupe => {
                let first = seen.insert(d.id);
                if !first {
                    tracing::debug!(deployment = %d.id, "dropping duplicate deployment record");
                }
                first
            }
        })
        .collect();

    Ok(deployments)
}

/// Run one fetch, filter, and resolve pass.
pub(crate) async fn run_cycle<S>(
    source: &S,
    inputs: &CycleInputs<'_>,
) -> Result<CycleReport, WaitError>
where
    S: DeploymentSource + ?Sized,
{
    let deployments = candidates(source, inputs).await?;
    let total = deployments.len();
    let mut report = CycleReport::default();

    for (index, deployment) in deployments.into_iter().enumerate() {
        let status = source.latest_status(deployment.id).await?;
        let environment = deployment.environment;

        let Some(status) = status else {
            report
                .diagnostics
                .warn(Warning::missing_status(&environment, deployment.id));
            report.deployments.push(SimplifiedDeployment {
                environment,
                url: None,
                state: None,
            });
            continue;
        };

        match status.state {
            DeploymentState::Failure => {
                return DeploymentFailedSnafu { environment }.fail();
            }
            DeploymentState::Inactive => match inputs.on_inactive {
                InactivePolicy::StopCycle => {
                    report
                        .diagnostics
                        .warn(Warning::inactive_cutoff(&environment, total - index - 1));
                    report.truncated = true;
                    break;
                }
                InactivePolicy::Skip => {
                    report
                        .diagnostics
                        .warn(Warning::inactive_skipped(&environment));
                }
            },
            _ => {
                tracing::debug!(%environment, state = %status.state, "resolved deployment");
                report.deployments.push(SimplifiedDeployment {
                    url: status.url().map(str::to_string),
                    state: Some(status.state),
                    environment,
                });
            }
        }
    }

    Ok(report)
}
