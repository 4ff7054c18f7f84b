//! Recording runner for tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::{CommandRunner, Outcome};
use gallery_dev_core::{CommandSpec, Error, Result};

/// How a recorded command was run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Inherited stdio
    Run,
    /// Captured stdout
    Capture,
}

/// Mock runner for testing (never spawns a process)
///
/// Every command is recorded in order. Captured commands return the next
/// queued listing, or empty output once the queue is drained.
///
/// # Example
/// ```
/// use gallery_dev_exec::{CommandRunner, CommandSpec, MockRunner};
///
/// # tokio_test::block_on(async {
/// let runner = MockRunner::new();
/// runner.push_listing("abc123\n").await;
///
/// let ps = CommandSpec::new("docker").arg("ps");
/// let outcome = runner.capture(&ps).await.unwrap();
/// assert_eq!(outcome.stdout, "abc123\n");
/// assert_eq!(runner.call_count().await, 1);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<(Mode, CommandSpec)>,
    listings: VecDeque<String>,
    exit_codes: HashMap<String, i32>,
    missing: HashSet<String>,
}

impl MockRunner {
    /// Create a new mock runner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue stdout for the next captured command
    pub async fn push_listing(&self, stdout: impl Into<String>) {
        self.state.lock().await.listings.push_back(stdout.into());
    }

    /// Make commands whose first argument is `subcommand` exit with `code`
    pub async fn set_exit_code(&self, subcommand: impl Into<String>, code: i32) {
        self.state
            .lock()
            .await
            .exit_codes
            .insert(subcommand.into(), code);
    }

    /// Make `program` fail to spawn, as if it were not installed
    pub async fn set_missing(&self, program: impl Into<String>) {
        self.state.lock().await.missing.insert(program.into());
    }

    /// Every command recorded so far, in order
    pub async fn calls(&self) -> Vec<(Mode, CommandSpec)> {
        self.state.lock().await.calls.clone()
    }

    /// Only the commands, without their mode
    pub async fn commands(&self) -> Vec<CommandSpec> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .map(|(_, cmd)| cmd.clone())
            .collect()
    }

    /// Number of commands recorded so far
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    async fn record(&self, mode: Mode, command: &CommandSpec) -> Result<Outcome> {
        let mut state = self.state.lock().await;

        if state.missing.contains(&command.program) {
            tracing::debug!(program = %command.program, "Mock: Program missing");
            return Err(Error::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            });
        }

        state.calls.push((mode, command.clone()));

        let code = command
            .args
            .first()
            .and_then(|sub| state.exit_codes.get(sub))
            .copied()
            .unwrap_or(0);

        let stdout = match mode {
            Mode::Capture => state.listings.pop_front().unwrap_or_default(),
            Mode::Run => String::new(),
        };

        tracing::debug!(command = %command, ?mode, code, "Mock: Recorded command");

        Ok(Outcome {
            code: Some(code),
            stdout,
        })
    }
}

impl std::fmt::Debug for MockRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRunner").finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &CommandSpec) -> Result<Outcome> {
        self.record(Mode::Run, command).await
    }

    async fn capture(&self, command: &CommandSpec) -> Result<Outcome> {
        self.record(Mode::Capture, command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_runner_records_in_order() {
        let runner = MockRunner::new();

        let build = CommandSpec::new("docker").arg("build");
        let ps = CommandSpec::new("docker").arg("ps");

        runner.run(&build).await.unwrap();
        runner.capture(&ps).await.unwrap();

        let calls = runner.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (Mode::Run, build));
        assert_eq!(calls[1], (Mode::Capture, ps));
    }

    #[tokio::test]
    async fn test_mock_runner_listings_drain() {
        let runner = MockRunner::new();
        runner.push_listing("abc123\n").await;

        let ps = CommandSpec::new("docker").arg("ps");
        assert_eq!(runner.capture(&ps).await.unwrap().stdout, "abc123\n");
        assert_eq!(runner.capture(&ps).await.unwrap().stdout, "");
    }

    #[tokio::test]
    async fn test_mock_runner_exit_codes() {
        let runner = MockRunner::new();
        runner.set_exit_code("kill", 1).await;

        let kill = CommandSpec::new("docker").args(["kill", "abc123"]);
        let ps = CommandSpec::new("docker").arg("ps");

        assert_eq!(runner.run(&kill).await.unwrap().code, Some(1));
        assert!(runner.capture(&ps).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_mock_runner_missing_program() {
        let runner = MockRunner::new();
        runner.set_missing("docker").await;

        let err = runner
            .run(&CommandSpec::new("docker").arg("build"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert_eq!(runner.call_count().await, 0);
    }
}
