use std::time::Duration;
use tokio::time::Instant;

/// Re-authenticate slightly before the remote session's 24 hour expiry
const REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60 - 5 * 60);

/// Tracks when the gateway session was last refreshed
///
/// The remote session stays valid for about a day, so the platform reuses
/// the cached session inside that window and re-authenticates only once it
/// goes stale. `needs_refresh` is a pure predicate over an injected `now`,
/// which keeps the cadence testable under tokio's paused clock.
#[derive(Debug)]
pub(crate) struct Session {
    last_refreshed: Option<Instant>,
    interval: Duration,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            last_refreshed: None,
            interval: REFRESH_INTERVAL,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_interval(interval: Duration) -> Self {
        Self {
            last_refreshed: None,
            interval,
        }
    }

    /// True when no refresh has happened yet or the window has elapsed
    pub(crate) fn needs_refresh(&self, now: Instant) -> bool {
        match self.last_refreshed {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        }
    }

    /// Record a successful refresh at `now`
    pub(crate) fn mark_refreshed(&mut self, now: Instant) {
        self.last_refreshed = Some(now);
    }
}
