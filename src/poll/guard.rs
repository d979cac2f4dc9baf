// ABOUTME: Races the poll loop against the overall time budget.
// ABOUTME: Whichever finishes first decides the outcome; the loser is dropped or detached.

use std::time::Duration;

use super::cycle::SimplifiedDeployment;
use super::engine::StabilityEngine;
use super::error::WaitError;
use crate::github::DeploymentSource;

/// Wait for deployments to stabilise, failing after `max_timeout`.
///
/// The engine runs as its own task. If the timer fires first the task is
/// detached rather than awaited; in-flight requests are not interrupted and
/// their results are discarded. If the engine finishes first the timer is
/// dropped.
pub async fn wait_for_deployments<S>(
    engine: StabilityEngine<S>,
    max_timeout: Duration,
) -> Result<Vec<SimplifiedDeployment>, WaitError>
where
    S: DeploymentSource + 'static,
{
    let mut runner = tokio::spawn(engine.run());
    let timer = tokio::time::sleep(max_timeout);
    tokio::pin!(timer);

    tokio::select! {
        joined = &mut runner => match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(WaitError::Aborted { message: e.to_string() }),
        },
        () = &mut timer => {
            tracing::debug!("time budget exhausted, detaching poll task");
            drop(runner);
            Err(WaitError::TimedOut { after: max_timeout })
        }
    }
}
