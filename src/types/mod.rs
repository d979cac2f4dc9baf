// ABOUTME: Validated domain types shared across modules.
// ABOUTME: Repository names, git references, and deployment identifiers.

mod id;
mod reference;
mod repo_name;

pub use id::DeploymentId;
pub use reference::{Reference, ReferenceKind};
pub use repo_name::{RepoName, RepoNameError};
