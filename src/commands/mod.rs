// ABOUTME: Command module aggregator for the deploy-wait CLI.
// ABOUTME: Re-exports the wait command handler.

mod wait;

pub use wait::wait;
