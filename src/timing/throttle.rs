//! Leading-edge throttle: admits at most one action per limit window.

use std::time::{Duration, Instant};

/// Rate limiter admitting one action per window, leading edge first.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given minimum spacing between actions.
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    /// Whether an action may run now. Admitting an action starts the window.
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the window so the next call is admitted immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
