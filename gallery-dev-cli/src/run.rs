//! Operation execution and reporting

use anyhow::{Context, Result};
use gallery_dev_core::DevConfig;
use gallery_dev_exec::CommandRunner;
use gallery_dev_tasks::{TaskContext, dispatch};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::Cli;

pub async fn execute(cli: Cli, config: DevConfig, runner: Arc<dyn CommandRunner>) -> Result<()> {
    let operation = cli.command;
    let ctx = TaskContext::new(config, runner)
        .with_strict(cli.strict)
        .with_dry_run(cli.dry_run);

    let summary = dispatch(operation, &ctx)
        .await
        .with_context(|| format!("'{operation}' failed"))?;

    if summary.failed > 0 {
        warn!(
            "⚠️  {} of {} command(s) exited unsuccessfully; check the output above",
            summary.failed, summary.executed
        );
    } else if !cli.dry_run {
        info!("✅ {operation} done ({} command(s))", summary.executed);
    }

    Ok(())
}
