//! Trailing-edge debouncer parameterized by a payload type.
//!
//! Coalesces bursts: each [`Debouncer::submit`] replaces the pending payload
//! and pushes the deadline out by the full wait. [`Debouncer::poll`] releases
//! the latest payload once the wait has elapsed with no further submissions.

use std::time::{Duration, Instant};

/// A trailing-edge debounce wrapper around a pending payload.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given trailing wait.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Submit a payload, replacing any pending one and restarting the wait.
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.wait));
    }

    /// Release the pending payload if the wait has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop any pending payload without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a payload is waiting to be released.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
