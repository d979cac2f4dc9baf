// ABOUTME: Validated "owner/name" repository identifier.
// ABOUTME: Rejects empty segments and characters GitHub does not allow in names.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoNameError {
    #[error("repository name cannot be empty")]
    Empty,

    #[error("repository name must have the form owner/name: '{0}'")]
    MissingSlash(String),

    #[error("repository owner cannot be empty")]
    EmptyOwner,

    #[error("repository name cannot be empty after the owner")]
    EmptyName,

    #[error("invalid character in repository name: '{0}'")]
    InvalidChar(char),
}

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
    full: String,
    slash: usize,
}

impl RepoName {
    pub fn new(value: &str) -> Result<Self, RepoNameError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RepoNameError::Empty);
        }

        let slash = value
            .find('/')
            .ok_or_else(|| RepoNameError::MissingSlash(value.to_string()))?;

        let (owner, name) = (&value[..slash], &value[slash + 1..]);
        if owner.is_empty() {
            return Err(RepoNameError::EmptyOwner);
        }
        if name.is_empty() {
            return Err(RepoNameError::EmptyName);
        }

        for c in owner.chars().chain(name.chars()) {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(RepoNameError::InvalidChar(c));
            }
        }

        Ok(Self {
            full: value.to_string(),
            slash,
        })
    }

    pub fn owner(&self) -> &str {
        &self.full[..self.slash]
    }

    pub fn name(&self) -> &str {
        &self.full[self.slash + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full)
    }
}
