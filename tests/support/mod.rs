// ABOUTME: Test support utilities.
// ABOUTME: Tracing setup, a scripted deployment source, and context/settings builders.

use std::sync::Once;
use std::time::Duration;

use deploy_wait::context::TriggerContext;
use deploy_wait::poll::PollSettings;
use deploy_wait::types::{Reference, RepoName};

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod http_stub;
#[allow(dead_code)]
pub mod scripted_source;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("deploy_wait=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Context for `octo/app` at commit `sha` on branch `branch`.
#[allow(dead_code)]
pub fn context(sha: &str, branch: &str) -> TriggerContext {
    TriggerContext::new(
        RepoName::new("octo/app").unwrap(),
        Reference::commit(sha),
        Reference::branch(branch),
    )
}

/// Default settings with short, distinct intervals.
#[allow(dead_code)]
pub fn settings() -> PollSettings {
    PollSettings {
        check_interval: Duration::from_secs(10),
        confirm_interval: Duration::from_secs(30),
        ..PollSettings::default()
    }
}
