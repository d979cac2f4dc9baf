// ABOUTME: Regular-expression filter over deployment environment names.
// ABOUTME: Uses search semantics: the pattern may match anywhere in the name.

use regex::Regex;
use serde::Deserialize;
use std::fmt;

use super::ConfigError;

/// Restricts which deployments take part in the stability decision.
#[derive(Clone)]
pub struct EnvironmentFilter {
    pattern: Regex,
}

impl EnvironmentFilter {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// Parse an optional filter input. Blank input means no filter.
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, ConfigError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(pattern) => Self::new(pattern).map(Some),
        }
    }

    pub fn matches(&self, environment: &str) -> bool {
        self.pattern.is_match(environment)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl fmt::Debug for EnvironmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnvironmentFilter")
            .field(&self.pattern.as_str())
            .finish()
    }
}

impl fmt::Display for EnvironmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern.as_str())
    }
}

pub(super) fn deserialize_filter<'de, D>(
    deserializer: D,
) -> Result<Option<EnvironmentFilter>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    EnvironmentFilter::parse_optional(raw.as_deref()).map_err(serde::de::Error::custom)
}
