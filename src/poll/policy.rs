// ABOUTME: Named policies for the two ambiguous corners of a poll cycle.
// ABOUTME: Duplicate deployment records across references, and inactive statuses.

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// What to do when the commit and branch lookups return the same deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first record for each id; commit results come first.
    #[default]
    Dedupe,
    /// Keep every record, resolving and reporting duplicates separately.
    Keep,
}

/// What to do when a deployment's latest status is `inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InactivePolicy {
    /// Stop examining the rest of the cycle's deployments.
    ///
    /// Deployments after the inactive one are neither resolved nor reported,
    /// and the partial list is judged on its own.
    #[default]
    StopCycle,
    /// Leave the inactive deployment out and keep going.
    Skip,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dedupe" => Ok(DuplicatePolicy::Dedupe),
            "keep" => Ok(DuplicatePolicy::Keep),
            other => Err(format!(
                "unknown duplicate policy: {other} (expected dedupe or keep)"
            )),
        }
    }
}

impl FromStr for InactivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stop-cycle" => Ok(InactivePolicy::StopCycle),
            "skip" => Ok(InactivePolicy::Skip),
            other => Err(format!(
                "unknown inactive policy: {other} (expected stop-cycle or skip)"
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Dedupe => write!(f, "dedupe"),
            DuplicatePolicy::Keep => write!(f, "keep"),
        }
    }
}

impl fmt::Display for InactivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InactivePolicy::StopCycle => write!(f, "stop-cycle"),
            InactivePolicy::Skip => write!(f, "skip"),
        }
    }
}

impl<'de> Deserialize<'de> for DuplicatePolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for InactivePolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
