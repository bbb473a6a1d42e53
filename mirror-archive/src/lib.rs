//! Mirror-clone a repository and package it as a zstd-compressed tarball.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (credentials, settings, the step
//!   table, timing). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (environment and config loading,
//!   stale artifact cleanup, process execution). Isolated behind the
//!   [`io::process::CommandRunner`] trait so tests can script outcomes.
//!
//! [`pipeline`] coordinates the two to implement the archive run, and
//! [`report`] renders its outcome.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
