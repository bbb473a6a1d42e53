//! Elapsed-time helpers for progress logs.

use std::time::Duration;

/// Round `elapsed` to the nearest millisecond, halves rounding up.
pub fn round_to_millis(elapsed: Duration) -> Duration {
    let millis = (elapsed.as_nanos() + 500_000) / 1_000_000;
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Render a duration for log lines (`1.234s`, `87ms`).
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:?}", round_to_millis(elapsed))
}
