//! Single-slot repeating countdown.
//!
//! The slot holds at most one deadline; starting always replaces whatever was
//! armed, so two countdowns can never run concurrently. Firing re-arms the
//! slot for the next period, giving `setInterval`-like cadence with explicit
//! cancel/restart semantics.

use std::time::{Duration, Instant};

/// At-most-one repeating countdown timer.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    period: Duration,
    deadline: Option<Instant>,
}

impl Countdown {
    /// Create a disarmed countdown with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the countdown for one full period from `now`.
    ///
    /// Any previously armed deadline is replaced — cancel-then-start is a
    /// single operation here, which is what keeps the at-most-one invariant.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    /// Disarm the countdown. Idempotent.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check for expiry. When the deadline has passed the slot re-arms for
    /// the next period and returns `true`; a disarmed slot never fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Whether a deadline is currently armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}
