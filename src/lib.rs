// ABOUTME: Library root for deploy-wait - the deployment stability gate.
// ABOUTME: The main binary is in main.rs.

pub mod action;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod github;
pub mod output;
pub mod poll;
pub mod types;
