//! Simple File Gallery development helper
//!
//! Builds, starts, stops and tests the gallery's development container by
//! delegating to the container runtime.

use anyhow::{Context, Result};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod run;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command-line arguments; exits 2 on a bad command
    let cli = Cli::parse_or_exit();

    init_logging(cli.verbose);

    if let Err(e) = execute(cli).await {
        eprintln!("❌ Error: {e:#}");
        process::exit(1);
    }
}

/// Logs go to stderr so the delegated tools own stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn execute(cli: Cli) -> Result<()> {
    let config = gallery_dev_core::DevConfig::from_current_dir()
        .context("Failed to determine the working directory")?;
    let runner = Arc::new(gallery_dev_exec::SystemRunner::new());

    run::execute(cli, config, runner).await
}
