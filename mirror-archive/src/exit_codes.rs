//! Stable exit codes for the `mirror-archive` binary.

/// Every mandatory step succeeded and the compressed archive exists.
pub const OK: i32 = 0;
/// A mandatory step or the pre-run cleanup failed, or no archive was produced.
pub const FAILED: i32 = 1;
/// A required environment variable or the settings file was missing or invalid.
pub const CONFIG: i32 = 2;
