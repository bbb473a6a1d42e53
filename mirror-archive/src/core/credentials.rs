//! Required credentials read from the process environment.
//!
//! Values are resolved through a lookup function so validation stays pure;
//! [`crate::io::config`] supplies `std::env` as the lookup at runtime.

use std::fmt;

use anyhow::{Result, bail};

/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable holding the `owner/name` repository identifier.
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

/// Mask printed in place of secret values.
pub const REDACTED: &str = "***";

/// A string that never prints its contents through `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value. Only use this to build child process arguments.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of the secret in `text` with [`REDACTED`].
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        text.replace(&self.0, REDACTED)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Token and repository identifier for the run. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: Secret,
    /// Repository in `owner/name` form.
    pub repository: String,
}

impl Credentials {
    /// Resolve both variables through `lookup`, failing on the first missing one.
    ///
    /// Whitespace-only values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required(&lookup, TOKEN_VAR)?;
        let repository = required(&lookup, REPOSITORY_VAR)?;
        validate_repository(&repository)?;
        Ok(Self {
            token: Secret::new(token),
            repository,
        })
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{name} environment variable is required"),
    }
}

/// Check the `owner/name` shape of a repository identifier.
pub fn validate_repository(repository: &str) -> Result<()> {
    let Some((owner, name)) = repository.split_once('/') else {
        bail!("{REPOSITORY_VAR} must have the form owner/name, got '{repository}'");
    };
    let well_formed = |part: &str| !part.is_empty() && !part.contains(['/', ' ', '\t', '\n']);
    if !well_formed(owner) || !well_formed(name) {
        bail!("{REPOSITORY_VAR} must have the form owner/name, got '{repository}'");
    }
    Ok(())
}
