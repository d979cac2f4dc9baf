// ABOUTME: The stability state machine driving repeated poll cycles.
// ABOUTME: Requires consecutive clean cycles before success; any failure ends the run.

use std::time::Duration;

use super::counter::StabilityCounter;
use super::cycle::{CycleInputs, CycleReport, SimplifiedDeployment, run_cycle};
use super::error::WaitError;
use super::policy::{DuplicatePolicy, InactivePolicy};
use super::{plural, seconds};
use crate::config::EnvironmentFilter;
use crate::context::TriggerContext;
use crate::github::DeploymentSource;

/// Timings and policies for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Consecutive clean cycles needed for success.
    pub required_checks: u32,
    /// Delay after a cycle that was not clean.
    pub check_interval: Duration,
    /// Delay between clean confirmations.
    pub confirm_interval: Duration,
    /// Delay before the first cycle.
    pub initial_delay: Duration,
    pub duplicates: DuplicatePolicy,
    pub on_inactive: InactivePolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            required_checks: 3,
            check_interval: Duration::from_secs(60),
            confirm_interval: Duration::from_secs(30),
            initial_delay: Duration::ZERO,
            duplicates: DuplicatePolicy::default(),
            on_inactive: InactivePolicy::default(),
        }
    }
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    Waiting { clean_checks: u32 },
    StableSuccess(Vec<SimplifiedDeployment>),
    Failed { reason: String },
}

impl EngineState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EngineState::Waiting { .. })
    }
}

/// What to do after a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not done yet; sleep this long and poll again.
    Wait(Duration),
    /// Stable: the last cycle's deployments.
    Stable(Vec<SimplifiedDeployment>),
}

/// Polls deployments for one commit/branch until they are stable or one fails.
pub struct StabilityEngine<S> {
    source: S,
    context: TriggerContext,
    filter: Option<EnvironmentFilter>,
    settings: PollSettings,
    counter: StabilityCounter,
    state: EngineState,
    cycles: u32,
}

impl<S: DeploymentSource> StabilityEngine<S> {
    pub fn new(
        source: S,
        context: TriggerContext,
        filter: Option<EnvironmentFilter>,
        settings: PollSettings,
    ) -> Self {
        Self {
            source,
            context,
            filter,
            counter: StabilityCounter::new(settings.required_checks),
            settings,
            state: EngineState::Waiting { clean_checks: 0 },
            cycles: 0,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn clean_checks(&self) -> u32 {
        self.counter.count()
    }

    /// Number of cycles run so far.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Run a single cycle and advance the state machine.
    ///
    /// # Errors
    ///
    /// Returns `WaitError::DeploymentFailed` as soon as a deployment reports
    /// `failure`, and `WaitError::Api` when the platform cannot be queried.
    pub async fn poll_once(&mut self) -> Result<Step, WaitError> {
        match &self.state {
            EngineState::StableSuccess(deployments) => {
                return Ok(Step::Stable(deployments.clone()));
            }
            EngineState::Failed { reason } => {
                return Err(WaitError::Aborted {
                    message: reason.clone(),
                });
            }
            EngineState::Waiting { .. } => {}
        }

        self.cycles += 1;
        tracing::info!(cycle = self.cycles, "Running deployment check...");

        let inputs = CycleInputs {
            context: &self.context,
            filter: self.filter.as_ref(),
            duplicates: self.settings.duplicates,
            on_inactive: self.settings.on_inactive,
        };

        let report = match run_cycle(&self.source, &inputs).await {
            Ok(report) => report,
            Err(err) => {
                if let Some(environment) = err.failed_environment() {
                    self.state = EngineState::Failed {
                        reason: format!("{environment} failed."),
                    };
                }
                return Err(err);
            }
        };

        Ok(self.advance(report))
    }

    fn advance(&mut self, report: CycleReport) -> Step {
        let clean = report.is_clean();
        let count = self.counter.record(clean);
        tracing::debug!(
            deployments = report.deployments.len(),
            truncated = report.truncated,
            clean,
            count,
            "cycle complete"
        );

        if !clean {
            tracing::info!(
                "Pending deployments. Checking again in {} seconds",
                seconds(self.settings.check_interval)
            );
            self.state = EngineState::Waiting { clean_checks: 0 };
            return Step::Wait(self.settings.check_interval);
        }

        if self.counter.is_stable() {
            tracing::info!("Passed {count} {}.", plural(count as usize, "time"));
            self.state = EngineState::StableSuccess(report.deployments.clone());
            return Step::Stable(report.deployments);
        }

        tracing::info!(
            "Passed {count} {}. Waiting {} seconds before next check...",
            plural(count as usize, "time"),
            seconds(self.settings.confirm_interval)
        );
        self.state = EngineState::Waiting {
            clean_checks: count,
        };
        Step::Wait(self.settings.confirm_interval)
    }

    /// Poll until stable, sleeping between cycles as the state machine asks.
    pub async fn run(mut self) -> Result<Vec<SimplifiedDeployment>, WaitError> {
        tracing::info!(
            repository = %self.context.repository,
            commit = self.context.commit.as_str(),
            branch = self.context.branch.as_str(),
            "Starting..."
        );

        if !self.settings.initial_delay.is_zero() {
            tracing::info!(
                "Waiting {} seconds before the first check",
                seconds(self.settings.initial_delay)
            );
            tokio::time::sleep(self.settings.initial_delay).await;
        }

        loop {
            match self.poll_once().await? {
                Step::Stable(deployments) => return Ok(deployments),
                Step::Wait(delay) => tokio::time::sleep(delay).await,
            }
        }
    }
}
