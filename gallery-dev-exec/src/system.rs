//! Runner that spawns real processes

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

use crate::backend::{CommandRunner, Outcome};
use gallery_dev_core::{CommandSpec, Error, Result};

/// Production runner backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(spec.os_args()).stdin(Stdio::inherit());
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(spec: &CommandSpec, source: std::io::Error) -> Error {
        Error::Spawn {
            program: spec.program.clone(),
            source,
        }
    }
}

fn exit_code(status: ExitStatus) -> Option<i32> {
    let code = status.code();
    if code.is_none() {
        debug!(%status, "Process terminated by signal");
    }
    code
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<Outcome> {
        debug!(command = %spec, "Spawning");

        let status = Self::command(spec)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Self::spawn_error(spec, e))?;

        Ok(Outcome {
            code: exit_code(status),
            stdout: String::new(),
        })
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<Outcome> {
        debug!(command = %spec, "Spawning with captured stdout");

        let output = Self::command(spec)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| Self::spawn_error(spec, e))?;

        Ok(Outcome {
            code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
