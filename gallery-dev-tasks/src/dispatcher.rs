//! Operation dispatch
//!
//! Each [`Operation`] maps to exactly one action in [`ACTIONS`]. Actions run
//! their commands one after another through the context's runner and never
//! overlap.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gallery_dev_core::{BuildArgs, CommandSpec, ContainerId, DevConfig, Error, Operation, Result};
use gallery_dev_exec::{CommandRunner, Outcome};
use tracing::{debug, info, warn};

use crate::{opener, plans};

/// Future returned by an action
pub type ActionFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// An action: runs the commands of one operation
pub type ActionFn = fn(&TaskContext) -> ActionFuture<'_>;

/// Lookup table from operation to action, covering every operation once
pub static ACTIONS: [(Operation, ActionFn); 7] = [
    (Operation::Build, build),
    (Operation::Start, start),
    (Operation::Stop, stop),
    (Operation::Shell, shell),
    (Operation::WebserviceTest, webservice_test),
    (Operation::InstallBasicViewer, install_basic_viewer),
    (Operation::BuildDeploy, build_deploy),
];

/// Find the action for an operation
#[must_use]
pub fn action_for(operation: Operation) -> Option<ActionFn> {
    ACTIONS
        .iter()
        .find(|(op, _)| *op == operation)
        .map(|(_, action)| *action)
}

/// What an action did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Commands handed to the runner
    pub executed: usize,
    /// Commands that exited unsuccessfully
    pub failed: usize,
}

/// Everything an action needs: configuration, runner and mode flags
pub struct TaskContext {
    config: DevConfig,
    runner: Arc<dyn CommandRunner>,
    strict: bool,
    dry_run: bool,
    executed: AtomicUsize,
    failed: AtomicUsize,
}

impl TaskContext {
    /// Create a context in the default fire-and-forget mode
    #[must_use]
    pub fn new(config: DevConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            strict: false,
            dry_run: false,
            executed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Fail on the first unsuccessful command
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Log commands instead of running them
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Counters for the commands run so far
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            executed: self.executed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// Run a command and record its status without judging it
    async fn run_unchecked(&self, command: &CommandSpec) -> Result<Outcome> {
        if self.dry_run {
            info!("[dry-run] {command}");
            return Ok(Outcome::success());
        }

        info!("▶ {command}");
        self.executed.fetch_add(1, Ordering::Relaxed);
        self.runner.run(command).await
    }

    /// Record a finished command; in strict mode a failure becomes an error
    fn settle(&self, command: &CommandSpec, outcome: Outcome) -> Result<()> {
        if outcome.is_success() {
            debug!(command = %command, "Command succeeded");
            return Ok(());
        }

        self.failed.fetch_add(1, Ordering::Relaxed);
        warn!(command = %command, code = ?outcome.code, "Command exited unsuccessfully");

        if self.strict {
            outcome.check(command)?;
        }
        Ok(())
    }

    async fn execute(&self, command: &CommandSpec) -> Result<()> {
        let outcome = self.run_unchecked(command).await?;
        self.settle(command, outcome)
    }

    /// Identifiers of running development containers, in listing order
    async fn running_containers(&self) -> Result<Vec<ContainerId>> {
        let command = plans::list_running(&self.config);

        if self.dry_run {
            info!("[dry-run] {command}");
            return Ok(Vec::new());
        }

        debug!(command = %command, "Listing containers");
        self.executed.fetch_add(1, Ordering::Relaxed);
        let outcome = self.runner.capture(&command).await?;

        let (ids, rejected) = ContainerId::parse_listing(&outcome.stdout);
        self.settle(&command, outcome)?;

        for err in rejected {
            warn!("Skipping listing line: {err}");
        }
        if ids.is_empty() {
            info!(image = %self.config.image, "No running containers");
        } else {
            debug!(count = ids.len(), "Found running containers");
        }

        Ok(ids)
    }

    /// Open a report in the browser; failures are only logged
    async fn open_report(&self, relative: &std::path::Path) {
        let path = opener::resolve_report(&self.config, relative);
        let command = opener::open_command(&path);

        match self.run_unchecked(&command).await {
            Ok(outcome) if outcome.is_success() => {}
            Ok(outcome) => {
                warn!(path = %path.display(), code = ?outcome.code, "Browser launcher failed");
            }
            Err(e) => warn!(path = %path.display(), "Could not open browser: {e}"),
        }
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("config", &self.config)
            .field("strict", &self.strict)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

/// Run the action for `operation` and report what it did
///
/// # Errors
/// Returns error if the configuration is invalid, a program cannot be
/// started, or (in strict mode) a command exits unsuccessfully
pub async fn dispatch(operation: Operation, ctx: &TaskContext) -> Result<Summary> {
    ctx.config.validate()?;

    let action = action_for(operation).ok_or_else(|| Error::InvalidConfig {
        message: format!("No action registered for '{operation}'"),
    })?;

    info!(operation = %operation, "{}", operation.about());
    action(ctx).await?;

    let summary = ctx.summary();
    debug!(
        executed = summary.executed,
        failed = summary.failed,
        "Operation finished"
    );
    Ok(summary)
}

fn build(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move {
        ctx.execute(&plans::build_image(&ctx.config, BuildArgs::development())?)
            .await
    })
}

fn build_deploy(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move {
        ctx.execute(&plans::build_image(&ctx.config, BuildArgs::deploy())?)
            .await
    })
}

fn start(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move { ctx.execute(&plans::start_detached(&ctx.config)?).await })
}

fn stop(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move {
        for id in ctx.running_containers().await? {
            ctx.execute(&plans::kill(&ctx.config, &id)).await?;
        }
        Ok(())
    })
}

fn shell(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move {
        for id in ctx.running_containers().await? {
            ctx.execute(&plans::exec_shell(&ctx.config, &id)).await?;
        }
        Ok(())
    })
}

fn webservice_test(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move {
        let command = plans::webservice_tests(&ctx.config)?;
        let outcome = ctx.run_unchecked(&command).await?;

        // Failing tests still produce reports worth looking at
        if !ctx.dry_run {
            ctx.open_report(&ctx.config.coverage_report).await;
            ctx.open_report(&ctx.config.testdox_report).await;
        }

        ctx.settle(&command, outcome)
    })
}

fn install_basic_viewer(ctx: &TaskContext) -> ActionFuture<'_> {
    Box::pin(async move { ctx.execute(&plans::install_basic_viewer(&ctx.config)).await })
}
