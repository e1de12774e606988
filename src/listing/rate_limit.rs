//! Fixed-interval spacing for outbound requests.

use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{trace, warn};

use crate::utils::fmt_duration;

/// Spacing used when no override is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Intervals below this are accepted but logged as unfriendly to the remote server.
pub const ADVISED_MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Enforces a minimum gap between consecutive requests.
///
/// The timestamp is recorded *after* any wait, so the guarantee is measured from one
/// permitted request to the next rather than from when callers asked.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_request_at: Option<Instant>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl RateLimiter {
    /// Never fails. An interval below [`ADVISED_MIN_INTERVAL`] is reported by
    /// [`is_below_advised`](Self::is_below_advised) right away and logged as a warning
    /// on the first [`wait`](Self::wait), under whichever subscriber is driving it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request_at: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the configured interval is below [`ADVISED_MIN_INTERVAL`].
    pub fn is_below_advised(&self) -> bool {
        self.interval < ADVISED_MIN_INTERVAL
    }

    /// When the last request was permitted, if any.
    pub fn last_request_at(&self) -> Option<Instant> {
        self.last_request_at
    }

    /// Suspends until at least `interval` has passed since the last permitted request.
    pub async fn wait(&mut self) {
        if self.last_request_at.is_none() && self.is_below_advised() {
            warn!(
                interval = fmt_duration(self.interval),
                advised_min = fmt_duration(ADVISED_MIN_INTERVAL),
                "rate limit interval is below the advised minimum; please be kind to the course list server"
            );
        }

        if let Some(last) = self.last_request_at {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                let remaining = self.interval - elapsed;
                trace!(remaining = fmt_duration(remaining), "rate limited, sleeping");
                time::sleep(remaining).await;
            }
        }

        self.last_request_at = Some(Instant::now());
    }
}
