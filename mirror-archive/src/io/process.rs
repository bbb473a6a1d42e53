//! Child process execution for pipeline steps.
//!
//! The [`CommandRunner`] trait decouples pipeline orchestration from actual
//! process spawning. Tests use scripted runners that record invocations
//! without touching `git`, `tar`, or `zstd`.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, instrument, warn};
use wait_timeout::ChildExt;

use crate::core::plan::Step;

/// Abstraction over how a step's command is executed.
pub trait CommandRunner {
    /// Run `step` with `workdir` as the current directory.
    ///
    /// Returns an error if the command cannot be spawned, exits unsuccessfully,
    /// or exceeds the runner's time limit.
    fn run(&self, step: &Step, workdir: &Path) -> Result<()>;
}

/// Spawns real processes with stdout/stderr inherited from this process.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(step = %step.kind, program = %step.program))]
    fn run(&self, step: &Step, workdir: &Path) -> Result<()> {
        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!(command = %step.display_command(), "spawning child process");
        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawn {}", step.program))?;

        let status = match self.timeout {
            None => child
                .wait()
                .with_context(|| format!("wait for {}", step.program))?,
            Some(limit) => match child
                .wait_timeout(limit)
                .with_context(|| format!("wait for {}", step.program))?
            {
                Some(status) => status,
                None => {
                    warn!(timeout_secs = limit.as_secs(), "command timed out, killing");
                    child
                        .kill()
                        .with_context(|| format!("kill {}", step.program))?;
                    child
                        .wait()
                        .with_context(|| format!("wait for {} after kill", step.program))?;
                    bail!("{} timed out after {:?}", step.program, limit);
                }
            },
        };

        debug!(exit_code = ?status.code(), "command finished");
        ensure_success(&step.program, status)
    }
}

fn ensure_success(program: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    bail!("{program} exited unsuccessfully ({status})");
}
