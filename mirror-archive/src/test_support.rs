//! Test-only helpers: a scripted [`CommandRunner`] and a fake tool directory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
#[cfg(unix)]
use tempfile::TempDir;

use crate::core::plan::Step;
use crate::core::settings::ArchiveSettings;
use crate::core::types::StepKind;
use crate::io::process::CommandRunner;

/// Runner that records invocations and returns scripted outcomes.
///
/// With [`ScriptedRunner::simulating`], successful steps also reproduce the
/// filesystem effects of the real tools, so later steps and the final
/// existence check behave as in a real run.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    failures: HashMap<StepKind, String>,
    simulate: Option<ArchiveSettings>,
    invoked: RefCell<Vec<StepKind>>,
}

impl ScriptedRunner {
    pub fn simulating(settings: &ArchiveSettings) -> Self {
        Self {
            simulate: Some(settings.clone()),
            ..Self::default()
        }
    }

    /// Make `kind` fail with `message` instead of running.
    pub fn failing(mut self, kind: StepKind, message: &str) -> Self {
        self.failures.insert(kind, message.to_string());
        self
    }

    /// Steps invoked so far, in order.
    pub fn invoked(&self) -> Vec<StepKind> {
        self.invoked.borrow().clone()
    }

    fn apply_effects(settings: &ArchiveSettings, kind: StepKind, workdir: &Path) -> Result<()> {
        match kind {
            StepKind::Clone => {
                let dir = workdir.join(&settings.clone_dir);
                fs::create_dir_all(dir.join("refs")).context("simulate clone")?;
                fs::write(dir.join("HEAD"), "ref: refs/heads/main\n").context("simulate clone")?;
            }
            StepKind::Archive => {
                fs::write(workdir.join(&settings.archive_file), b"tar").context("simulate tar")?;
            }
            StepKind::Compress => {
                fs::rename(
                    workdir.join(&settings.archive_file),
                    workdir.join(&settings.compressed_file),
                )
                .context("simulate zstd --rm")?;
            }
            StepKind::Inspect => {}
        }
        Ok(())
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, step: &Step, workdir: &Path) -> Result<()> {
        self.invoked.borrow_mut().push(step.kind);
        if let Some(message) = self.failures.get(&step.kind) {
            bail!("{message}");
        }
        if let Some(settings) = &self.simulate {
            Self::apply_effects(settings, step.kind, workdir)?;
        }
        Ok(())
    }
}

/// A temporary directory of executable shell scripts standing in for real tools.
///
/// Prepend [`FakeToolchain::path_env`] to `PATH` when spawning the binary.
#[cfg(unix)]
pub struct FakeToolchain {
    dir: TempDir,
}

#[cfg(unix)]
impl FakeToolchain {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create fake tool dir")?,
        })
    }

    /// Toolchain whose `git`, `tar`, `zstd` and `ls` mimic the real tools'
    /// filesystem effects. `git` records its arguments to `git.args` in the
    /// working directory.
    pub fn working() -> Result<Self> {
        let tools = Self::new()?;
        tools.install("git", "printf '%s\\n' \"$@\" > git.args\nmkdir -p \"$4\"")?;
        tools.install("tar", "touch tar.invoked\nprintf 'tar' > \"$2\"")?;
        tools.install("zstd", "touch zstd.invoked\ncp \"$4\" \"$6\" && rm \"$4\"")?;
        tools.install("ls", "echo \"fake ls $*\"")?;
        Ok(tools)
    }

    /// Write an executable `/bin/sh` script named `name` with `body`.
    pub fn install(&self, name: &str, body: &str) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))
            .with_context(|| format!("write {}", path.display()))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("chmod {}", path.display()))?;
        Ok(path)
    }

    /// `PATH` value with the fake tools ahead of the inherited search path.
    pub fn path_env(&self) -> String {
        let inherited = std::env::var("PATH").unwrap_or_default();
        format!("{}:{inherited}", self.dir.path().display())
    }
}
