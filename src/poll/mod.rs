// ABOUTME: Deployment stability polling: cycles, counter, policies, engine, timeout guard.
// ABOUTME: Entry point is wait_for_deployments, which races the engine against a timer.

mod counter;
mod cycle;
mod engine;
mod error;
mod guard;
mod policy;

pub use counter::StabilityCounter;
pub use cycle::{CycleReport, SimplifiedDeployment, fetch_deployments};
pub use engine::{EngineState, PollSettings, StabilityEngine, Step};
pub use error::{WaitError, WaitErrorKind};
pub use guard::wait_for_deployments;
pub use policy::{DuplicatePolicy, InactivePolicy};

use std::time::Duration;

/// Whole seconds when exact, otherwise one decimal place.
pub(crate) fn seconds(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        format!("{:.1}", duration.as_secs_f64())
    }
}

pub(crate) fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Final summary line, e.g. "2 deployments look good 🚀".
pub fn summary(count: usize) -> String {
    format!("{count} {} look good 🚀", plural(count, "deployment"))
}
