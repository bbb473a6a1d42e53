//! Tunable settings for the archive pipeline (`mirror-archive.toml`).

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::Deserialize;

/// Default settings file name, resolved against the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "mirror-archive.toml";

/// Pipeline settings (TOML).
///
/// Every field is optional in the file; missing fields fall back to the
/// values the pipeline has always used.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveSettings {
    /// Destination of the mirror clone.
    pub clone_dir: PathBuf,

    /// Intermediate uncompressed archive, consumed by the compress step.
    pub archive_file: PathBuf,

    /// Final compressed artifact.
    pub compressed_file: PathBuf,

    /// Host substituted into the source URL template.
    pub remote_host: String,

    /// zstd compression level.
    pub compression_level: u8,

    /// zstd worker threads; `0` means one per core.
    pub compression_threads: u32,

    /// Kill a step that runs longer than this. Unset waits indefinitely.
    pub step_timeout_secs: Option<u64>,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            clone_dir: PathBuf::from("repo-mirror"),
            archive_file: PathBuf::from("repo.tar"),
            compressed_file: PathBuf::from("repo.tar.zst"),
            remote_host: "github.com".to_string(),
            compression_level: 19,
            compression_threads: 0,
            step_timeout_secs: None,
        }
    }
}

impl ArchiveSettings {
    pub fn validate(&self) -> Result<()> {
        for (key, path) in self.artifact_paths() {
            validate_artifact_path(key, path)?;
        }
        let paths = self.artifact_paths();
        for (i, (key, path)) in paths.iter().enumerate() {
            for (other_key, other) in &paths[i + 1..] {
                if path.starts_with(other) || other.starts_with(path) {
                    return Err(anyhow!(
                        "{key} and {other_key} must be distinct and not nested in each other"
                    ));
                }
            }
        }
        if self.remote_host.trim().is_empty() {
            return Err(anyhow!("remote_host must not be empty"));
        }
        // Levels above 19 require `--ultra`.
        if !(1..=19).contains(&self.compression_level) {
            return Err(anyhow!(
                "compression_level must be between 1 and 19, got {}",
                self.compression_level
            ));
        }
        if self.step_timeout_secs == Some(0) {
            return Err(anyhow!("step_timeout_secs must be > 0 when set"));
        }
        Ok(())
    }

    /// Output paths in cleanup order, keyed by their settings name.
    pub fn artifact_paths(&self) -> [(&'static str, &PathBuf); 3] {
        [
            ("clone_dir", &self.clone_dir),
            ("archive_file", &self.archive_file),
            ("compressed_file", &self.compressed_file),
        ]
    }
}

/// Artifact paths are removed recursively before every run, so they must stay
/// inside the workdir: relative, and made only of plain names.
fn validate_artifact_path(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    if !path
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(anyhow!(
            "{key} must be a relative path without '.' or '..' components, got '{}'",
            path.display()
        ));
    }
    Ok(())
}
