// ABOUTME: Git references used to look up deployments.
// ABOUTME: A commit SHA or a branch short name; either may be empty when unknown.

use std::fmt;

/// What kind of reference a lookup is made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Commit,
    Branch,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Commit => write!(f, "commit"),
            ReferenceKind::Branch => write!(f, "branch"),
        }
    }
}

/// A commit SHA or branch name. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    kind: ReferenceKind,
    value: String,
}

impl Reference {
    pub fn commit(sha: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Commit,
            value: sha.into().trim().to_string(),
        }
    }

    /// Build a branch reference from a full ref path.
    ///
    /// Only the last `/`-separated segment is kept, so `refs/heads/main`
    /// becomes `main`.
    pub fn branch(ref_path: &str) -> Self {
        let short = ref_path.trim().rsplit('/').next().unwrap_or_default();
        Self {
            kind: ReferenceKind::Branch,
            value: short.to_string(),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}
