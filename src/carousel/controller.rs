//! Carousel controller state machine.
//!
//! Owns the current page, the indicator set, and the auto-advance countdown.
//! Handlers are deterministic over an injected `Instant`, so every transition
//! is testable without a terminal or a live clock.
//!
//! Paging rules:
//! - `go_to` clamps into `[0, page_count - 1]` — direct jumps never wrap.
//! - `next`/`prev` wrap one step at the boundary, then delegate to `go_to`.
//! - any navigation restarts the idle countdown (cancel-then-start).
//! - hover pauses auto-advance; leaving restarts a fresh window.

use std::ops::Range;
use std::time::{Duration, Instant};

use crate::core::config::Breakpoints;
use crate::timing::Countdown;

/// One page indicator control. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    /// Page this indicator jumps to.
    pub index: usize,
    /// Whether it marks the current page.
    pub active: bool,
}

/// Pages a fixed item set through a capacity-limited viewport.
#[derive(Debug, Clone)]
pub struct CarouselController {
    item_count: usize,
    breakpoints: Breakpoints,
    capacity: usize,
    page_count: usize,
    current: usize,
    indicators: Vec<Indicator>,
    autoplay: Countdown,
    hovered: bool,
}

impl CarouselController {
    /// Build a controller for `item_count` items at the given viewport width
    /// and start the auto-advance countdown.
    #[must_use]
    pub fn new(
        item_count: usize,
        width_px: u32,
        breakpoints: Breakpoints,
        auto_advance: Duration,
        now: Instant,
    ) -> Self {
        let capacity = breakpoints.capacity_for(width_px);
        let page_count = item_count.div_ceil(capacity);
        let mut controller = Self {
            item_count,
            breakpoints,
            capacity,
            page_count,
            current: 0,
            indicators: Vec::new(),
            autoplay: Countdown::new(auto_advance),
            hovered: false,
        };
        controller.rebuild_indicators();
        if !controller.is_empty() {
            controller.autoplay.start(now);
        }
        controller
    }

    /// True when there is nothing to page — all navigation becomes a no-op.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    /// Items visible per page at the current width.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pages at the current capacity.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current page index.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current
    }

    /// Whether the pointer is over the carousel region.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the auto-advance countdown is armed.
    #[must_use]
    pub const fn autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    /// The indicator row, one entry per page.
    #[must_use]
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Item indices visible on the current page.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.current * self.capacity;
        let end = (start + self.capacity).min(self.item_count);
        start..end
    }

    /// Jump to a page, clamping into range, and restart the idle countdown.
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if self.is_empty() {
            return;
        }
        self.current = index.min(self.page_count - 1);
        self.sync_indicators();
        self.autoplay.start(now);
    }

    /// Advance one page, wrapping last → 0.
    pub fn next(&mut self, now: Instant) {
        if self.is_empty() {
            return;
        }
        let target = if self.current >= self.page_count - 1 {
            0
        } else {
            self.current + 1
        };
        self.go_to(target, now);
    }

    /// Step back one page, wrapping 0 → last.
    pub fn prev(&mut self, now: Instant) {
        if self.is_empty() {
            return;
        }
        let target = if self.current == 0 {
            self.page_count - 1
        } else {
            self.current - 1
        };
        self.go_to(target, now);
    }

    /// Pointer entered the carousel region: pause auto-advance. Page is
    /// unchanged; calling this twice is the same as calling it once.
    pub fn hover_start(&mut self) {
        self.hovered = true;
        self.autoplay.cancel();
    }

    /// Pointer left: restart auto-advance from a fresh window.
    pub fn hover_end(&mut self, now: Instant) {
        self.hovered = false;
        if !self.is_empty() {
            self.autoplay.start(now);
        }
    }

    /// Drive the auto-advance countdown. Fires at most once per call and
    /// never while hovered. Returns `true` when a page advance happened.
    pub fn poll_autoplay(&mut self, now: Instant) -> bool {
        if self.hovered || self.is_empty() {
            return false;
        }
        if self.autoplay.poll(now) {
            self.next(now);
            true
        } else {
            false
        }
    }

    /// Apply a (debounced) viewport resize: recompute capacity and page
    /// count, regenerate indicators, and reset to page 0.
    pub fn apply_resize(&mut self, width_px: u32, now: Instant) {
        self.capacity = self.breakpoints.capacity_for(width_px);
        self.page_count = self.item_count.div_ceil(self.capacity);
        self.rebuild_indicators();
        self.go_to(0, now);
    }

    /// Regenerate the indicator set: one control per page, index 0 active.
    /// Idempotent; the active flag is corrected by the following `go_to`.
    pub fn rebuild_indicators(&mut self) {
        self.indicators.clear();
        self.indicators.extend((0..self.page_count).map(|index| Indicator {
            index,
            active: index == 0,
        }));
    }

    fn sync_indicators(&mut self) {
        for indicator in &mut self.indicators {
            indicator.active = indicator.index == self.current;
        }
    }
}
