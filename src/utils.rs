//! Timing helpers for log fields.

use std::time::Duration;
use url::Url;

/// Fetches slower than this are logged as warnings.
pub const SLOW_FETCH_THRESHOLD: Duration = Duration::from_secs(5);

/// Format a `Duration` as a human-readable string with automatic unit scaling.
///
/// Produces output like `1.94ms` or `2.34s` using the `Debug` format of `Duration`,
/// rounded to two decimals.
pub fn fmt_duration(d: Duration) -> String {
    format!("{d:.2?}")
}

/// Warn about a page fetch that took longer than [`SLOW_FETCH_THRESHOLD`].
///
/// Requests are sequential, so the elapsed time here adds directly to the length of
/// a full traversal. Returns whether a warning was emitted.
pub fn warn_if_slow_fetch(url: &Url, elapsed: Duration) -> bool {
    if elapsed <= SLOW_FETCH_THRESHOLD {
        return false;
    }
    tracing::warn!(
        url = %url,
        duration = fmt_duration(elapsed),
        threshold = fmt_duration(SLOW_FETCH_THRESHOLD),
        "slow page fetch"
    );
    true
}
