// ABOUTME: Entry point for the deploy-wait CLI application.
// ABOUTME: Parses arguments, runs the wait, and maps the verdict to an exit code.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use deploy_wait::action::ActionReporter;
use deploy_wait::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbosity flags pick the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else if cli.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mode = cli.output;
    let reporter = ActionReporter::from_env();

    if let Err(e) = commands::wait(cli, Output::new(mode), &reporter).await {
        let reason = e.to_string();
        Output::new(mode).error(&reason);
        reporter.report_failure(&reason);
        std::process::exit(1);
    }
}
