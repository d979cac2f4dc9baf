// ABOUTME: Identifier for a deployment record on the hosting platform.
// ABOUTME: Opaque to the engine; only used for status lookups and duplicate detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned deployment identifier.
#[must_use = "IDs reference resources and should not be ignored"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(u64);

impl DeploymentId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
