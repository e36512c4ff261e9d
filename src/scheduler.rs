//! Tick Scheduler
//!
//! Fixed-period tick source owned by a single dashboard session. Dropping the
//! scheduler drops its timer, so a session that ends leaves nothing running.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Shortest supported tick period
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Longest supported tick period (one day)
pub const MAX_PERIOD: Duration = Duration::from_secs(86_400);

/// Fires ticks at a fixed period
///
/// The first tick fires one full period after creation. A tick that is late
/// (because the session was busy) delays the following ones instead of
/// bursting to catch up.
pub struct Scheduler {
    interval: Interval,
    period: Duration,
    ticks: u64,
}

impl Scheduler {
    /// Create a scheduler with the given period, clamped to
    /// [`MIN_PERIOD`]..=[`MAX_PERIOD`]
    pub fn new(period: Duration) -> Self {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            interval,
            period,
            ticks: 0,
        }
    }

    /// Wait for the next tick and return its 1-based number
    ///
    /// Cancel-safe: dropping the future before it completes does not consume
    /// a tick.
    pub async fn next_tick(&mut self) -> u64 {
        self.interval.tick().await;
        self.ticks += 1;
        self.ticks
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks fired so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
