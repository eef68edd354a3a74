//! Minimum spacing between transmission rounds.

use embassy_time::{Duration, Instant};

/// Safe transmission floor of the bus
pub const MIN_TRANSMIT_INTERVAL: Duration = Duration::from_millis(10);

/// Check if a new round may start at `now`.
///
/// Nothing sent yet always permits. A clock that reads earlier than the
/// last round counts as zero elapsed time.
pub fn may_transmit(now: Instant, last_transmit: Option<Instant>, min_interval: Duration) -> bool {
    match last_transmit {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= min_interval,
    }
}

/// Tracks the start of the last transmission round
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    min_interval: Duration,
    last_round: Option<Instant>,
}

impl RateLimiter {
    /// Limiter with no round recorded yet
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_round: None,
        }
    }

    /// Check if a round may start at `now`
    pub fn permits(&self, now: Instant) -> bool {
        may_transmit(now, self.last_round, self.min_interval)
    }

    /// Mark `now` as the start of a round
    pub fn record(&mut self, now: Instant) {
        self.last_round = Some(now);
    }

    /// Start of the last recorded round
    pub const fn last_round(&self) -> Option<Instant> {
        self.last_round
    }

    /// Enforced spacing between round starts
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
