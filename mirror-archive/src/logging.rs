//! Progress logging for archive runs.
//!
//! All progress, timing, and outcome messages go through `tracing` to a single
//! timestamped stream on stderr. Child process output is inherited directly
//! and never passes through here.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `info` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=mirror_archive=debug mirror-archive --dry-run
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}
