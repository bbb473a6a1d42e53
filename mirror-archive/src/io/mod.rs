//! I/O helpers for the archive pipeline.

pub mod cleanup;
pub mod config;
pub mod process;
