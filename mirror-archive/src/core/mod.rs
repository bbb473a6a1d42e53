//! Deterministic, pure logic for the archive pipeline.
//!
//! Core modules must be free of I/O side effects. They build the step table,
//! validate configuration values, and classify outcomes so everything here can
//! be tested without spawning processes or touching the filesystem.

pub mod credentials;
pub mod plan;
pub mod settings;
pub mod timing;
pub mod types;
