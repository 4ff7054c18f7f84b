//! Command runner trait

use async_trait::async_trait;
use gallery_dev_core::{CommandSpec, Error, Result};

/// Result of one external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,

    /// Captured standard output; empty unless run through
    /// [`CommandRunner::capture`]
    pub stdout: String,
}

impl Outcome {
    /// Successful outcome with no output
    #[must_use]
    pub const fn success() -> Self {
        Self {
            code: Some(0),
            stdout: String::new(),
        }
    }

    /// Whether the process exited with status 0
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Convert a non-zero status into [`Error::CommandFailed`]
    ///
    /// # Errors
    /// Returns error if the process did not exit with status 0
    pub fn check(self, command: &CommandSpec) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::CommandFailed {
                command: command.to_string(),
                code: self.code,
            })
        }
    }
}

/// Trait for external process execution
///
/// This allows for different implementations:
/// - [`SystemRunner`](crate::SystemRunner) - Spawns real processes
/// - [`MockRunner`](crate::MockRunner) - Testing without a container runtime
///
/// Implementations wait for the process to finish before returning; a
/// non-zero exit is reported in the [`Outcome`], not as an error.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command with inherited stdio
    ///
    /// # Errors
    /// Returns error if the program cannot be started
    async fn run(&self, command: &CommandSpec) -> Result<Outcome>;

    /// Run a command and capture its standard output
    ///
    /// # Errors
    /// Returns error if the program cannot be started or its output read
    async fn capture(&self, command: &CommandSpec) -> Result<Outcome>;
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    async fn run(&self, command: &CommandSpec) -> Result<Outcome> {
        (**self).run(command).await
    }

    async fn capture(&self, command: &CommandSpec) -> Result<Outcome> {
        (**self).capture(command).await
    }
}
