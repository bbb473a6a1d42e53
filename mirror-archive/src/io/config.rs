//! Run configuration: required environment variables plus optional TOML settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::core::credentials::Credentials;
use crate::core::settings::ArchiveSettings;

/// Everything a run needs, loaded once before any side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub settings: ArchiveSettings,
}

/// Load credentials from the process environment and settings from `settings_path`.
///
/// With `missing_ok`, an absent settings file yields the defaults; otherwise it
/// is an error.
pub fn load_run_config(settings_path: &Path, missing_ok: bool) -> Result<RunConfig> {
    load_run_config_with(|name| std::env::var(name).ok(), settings_path, missing_ok)
}

/// Like [`load_run_config`] but with an explicit variable lookup.
///
/// Credentials are checked first so a missing variable is reported even when
/// the settings file is also broken.
pub fn load_run_config_with<F>(
    lookup: F,
    settings_path: &Path,
    missing_ok: bool,
) -> Result<RunConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = Credentials::from_lookup(lookup)?;
    let settings = load_settings(settings_path, missing_ok)?;
    Ok(RunConfig {
        credentials,
        settings,
    })
}

/// Load settings from a TOML file.
///
/// A missing file returns `ArchiveSettings::default()` when `missing_ok` is set.
pub fn load_settings(path: &Path, missing_ok: bool) -> Result<ArchiveSettings> {
    if !path.exists() {
        if !missing_ok {
            bail!("settings file {} not found", path.display());
        }
        debug!(path = %path.display(), "no settings file, using defaults");
        let settings = ArchiveSettings::default();
        settings.validate()?;
        return Ok(settings);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: ArchiveSettings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    debug!(path = %path.display(), ?settings, "settings loaded");
    Ok(settings)
}
