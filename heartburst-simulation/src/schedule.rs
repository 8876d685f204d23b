//! Fixed-period tick timing with bounded catch-up.

use std::time::{Duration, Instant};

/// Ticks handed out by a single poll before the schedule gives up catching up.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Fixed-period timer registration that drives [`HeartField`](crate::HeartField).
///
/// Holding a `TickSchedule` is what "running" means; dropping it withdraws
/// the registration so no further tick comes due.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    period: Duration,
    next_due: Instant,
}

impl TickSchedule {
    /// Arms a schedule whose first tick comes due one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        // A zero period would hand out ticks forever in `take_due`.
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Time left until the next tick, zero if it is already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Number of ticks due by `now`, moving the deadline past them.
    ///
    /// At most [`MAX_CATCH_UP_TICKS`] are returned; older missed ticks are dropped
    /// and the next deadline is re-based on `now`.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.next_due <= now && due < MAX_CATCH_UP_TICKS {
            self.next_due += self.period;
            due += 1;
        }
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        due
    }
}
