//! Pre-run removal of stale artifacts left by an earlier run.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::settings::ArchiveSettings;

/// Remove `path` (file, symlink, or directory tree) if it exists.
///
/// Returns whether anything was removed. A missing path is not an error.
pub fn remove_stale(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
        Err(err) => {
            return Err(err).with_context(|| format!("stat {}", path.display()));
        }
    };

    info!(path = %path.display(), "Cleaning up: {}", path.display());
    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("remove directory {}", path.display()))?;
    } else {
        fs::remove_file(path).with_context(|| format!("remove file {}", path.display()))?;
    }
    Ok(true)
}

/// Remove every output path of a previous run under `workdir`.
///
/// Fails on the first path that exists but cannot be removed.
pub fn clean_artifacts(workdir: &Path, settings: &ArchiveSettings) -> Result<usize> {
    let mut removed = 0;
    for (_, path) in settings.artifact_paths() {
        if remove_stale(&workdir.join(path))? {
            removed += 1;
        }
    }
    debug!(removed, "pre-run cleanup finished");
    Ok(removed)
}

/// Create the parent directories of nested output paths such as `out/repo.tar`.
pub fn create_output_dirs(workdir: &Path, settings: &ArchiveSettings) -> Result<()> {
    for (_, path) in settings.artifact_paths() {
        if let Some(parent) = workdir.join(path).parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    Ok(())
}
