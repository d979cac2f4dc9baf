// ABOUTME: Diagnostics accumulator for non-fatal observations during a poll cycle.
// ABOUTME: Collects warnings that do not end the wait but explain why it keeps waiting.

use crate::types::DeploymentId;

/// Collects non-fatal warnings for one poll cycle.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check whether a warning of `kind` was collected.
    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during a poll cycle.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A deployment has no status entries yet.
    pub fn missing_status(environment: &str, id: DeploymentId) -> Self {
        Self {
            kind: WarningKind::MissingStatus,
            message: format!("{environment} (deployment {id}) has no status yet"),
        }
    }

    /// An inactive deployment cut the cycle short.
    pub fn inactive_cutoff(environment: &str, skipped: usize) -> Self {
        Self {
            kind: WarningKind::InactiveCutoff,
            message: format!(
                "{environment} is inactive; {skipped} remaining deployment(s) not checked this cycle"
            ),
        }
    }

    /// An inactive deployment was left out of the cycle.
    pub fn inactive_skipped(environment: &str) -> Self {
        Self {
            kind: WarningKind::InactiveSkipped,
            message: format!("{environment} is inactive; ignoring it"),
        }
    }
}

/// Categories of warnings that can occur during a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Deployment exists but its status history is empty.
    MissingStatus,
    /// Inactive status stopped the rest of the cycle.
    InactiveCutoff,
    /// Inactive deployment ignored, cycle continued.
    InactiveSkipped,
}
