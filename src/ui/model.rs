//! Elm-style state model for the kiosk.
//!
//! All display state lives in [`KioskModel`]. Input events arrive as
//! [`KioskMsg`] values; side-effects are represented as [`KioskCmd`] values
//! returned from the update function.
//!
//! **Design invariant:** the model is deterministic and testable — no I/O
//! happens here.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::booking::form::{FieldValidator, ReservationForm};
use crate::carousel::CarouselController;
use crate::content::SiteContent;
use crate::content::menu::{FILTER_ALL, visible_indices};
use crate::core::config::Config;
use crate::logger::SessionEvent;
use crate::timing::{Countdown, Debouncer, Throttle};
use crate::ui::input::{Key, MouseInput};
use crate::ui::layout::{self, BlockId, ChromeState, PageLayout};
use crate::ui::preferences::PreferenceSource;
use crate::ui::theme::{AccessibilityProfile, Theme};

// ──────────────────── sections ────────────────────

/// Top-level page sections in navigation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    /// Hero landing block.
    #[default]
    Home,
    /// Menu board with the category filter.
    Menu,
    /// Testimonial carousel.
    Testimonials,
    /// Contact and reservation details.
    Contact,
}

impl Section {
    /// All sections, in nav order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Menu, Self::Testimonials, Self::Contact];

    /// 1-based section number for hotkey mapping (keys `1`–`4`).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Menu => 2,
            Self::Testimonials => 3,
            Self::Contact => 4,
        }
    }

    /// Resolve a 1-based number key. Returns `None` for out-of-range.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Home),
            2 => Some(Self::Menu),
            3 => Some(Self::Testimonials),
            4 => Some(Self::Contact),
            _ => None,
        }
    }

    /// Nav label as printed in the header.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Beranda",
            Self::Menu => "Menu",
            Self::Testimonials => "Testimoni",
            Self::Contact => "Kontak",
        }
    }

    /// Stable identifier used in the session log.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Menu => "menu",
            Self::Testimonials => "testimonials",
            Self::Contact => "contact",
        }
    }
}

// ──────────────────── overlays ────────────────────

/// Floating surfaces over the page. Only one can be active at a time; an
/// open overlay has input precedence over page keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Contextual key map.
    Help,
    /// The reservation form modal.
    Reservation,
}

// ──────────────────── notifications ────────────────────

/// Maximum number of visible notification toasts.
const MAX_NOTIFICATIONS: usize = 3;

/// Toast notification shown over the status bar.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Monotonic ID for expiry tracking.
    pub id: u64,
    /// Severity level controlling styling.
    pub level: NotificationLevel,
    /// Human-readable message text.
    pub message: String,
    /// Auto-dismiss deadline.
    pub expires_at: Instant,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// How long a toast stays visible.
const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

// ──────────────────── model ────────────────────

/// Complete display state for the kiosk.
///
/// This struct is the single source of truth for the view layer. The update
/// function mutates it; the render function reads it immutably.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct KioskModel {
    /// Effective configuration.
    pub config: Config,
    /// Immutable site content.
    pub content: SiteContent,
    /// Active theme.
    pub theme: Theme,
    /// Where the active theme came from.
    pub theme_source: PreferenceSource,
    /// Color/accessibility knobs.
    pub accessibility: AccessibilityProfile,
    /// Terminal dimensions (columns, rows).
    pub terminal_size: (u16, u16),
    /// Current scroll offset on the virtual page, in pixels.
    pub scroll_px: f64,
    /// Smooth-scroll destination.
    pub scroll_target_px: f64,
    /// Section owning the viewport top (drives the active nav link).
    pub active_section: Section,
    /// Compact nav drawer open.
    pub nav_menu_open: bool,
    /// Focused link index while walking the open nav drawer.
    pub nav_focus: usize,
    /// Active category filter value ("all" or a tag).
    pub filter: String,
    /// Filter options: "all" followed by the content's categories.
    pub filter_options: Vec<String>,
    /// Blocks that have completed their reveal.
    pub revealed: HashSet<BlockId>,
    /// Blocks scheduled to reveal at a deadline (stagger queues).
    pub pending_reveals: Vec<(BlockId, Instant)>,
    /// The testimonial carousel.
    pub carousel: CarouselController,
    /// Pointer currently over the carousel region.
    pub pointer_over_carousel: bool,
    /// Resize burst coalescing.
    pub resize_debounce: Debouncer<(u16, u16)>,
    /// Scroll-work rate limiting.
    pub scroll_throttle: Throttle,
    /// Active overlay, if any.
    pub overlay: Option<Overlay>,
    /// Reservation form state.
    pub reservation: ReservationForm,
    /// Field format validator.
    pub validator: FieldValidator,
    /// Transient press-feedback flashes.
    pub press_flashes: Vec<(layout::HitTarget, Instant)>,
    /// Repeating pulse schedule for the floating WhatsApp control; restarted
    /// by scroll activity.
    pub float_pulse_timer: Countdown,
    /// Active pulse flash window.
    pub float_pulse_until: Option<Instant>,
    /// Startup splash visible until this deadline.
    pub splash_until: Option<Instant>,
    /// Current virtual page layout.
    pub layout: PageLayout,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Monotonic tick counter.
    pub tick: u64,
    /// Active toasts (oldest first, max [`MAX_NOTIFICATIONS`]).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    pub next_notification_id: u64,
    /// Session start, for uptime logging.
    pub started_at: Instant,
}

impl KioskModel {
    /// Create a model from loaded config, content, and theme.
    #[must_use]
    pub fn new(
        config: Config,
        content: SiteContent,
        theme: Theme,
        theme_source: PreferenceSource,
        terminal_size: (u16, u16),
        now: Instant,
    ) -> Self {
        let width_px = layout::viewport_width_px(terminal_size.0);
        let carousel = CarouselController::new(
            content.testimonials.len(),
            width_px,
            config.breakpoints,
            config.carousel.auto_advance(),
            now,
        );
        let page = layout::build(&content, FILTER_ALL, width_px, config.breakpoints);

        let mut filter_options = vec![FILTER_ALL.to_owned()];
        filter_options.extend(content.categories());

        let splash_until = now + Duration::from_millis(config.motion.splash_ms);
        let hero_step = Duration::from_millis(config.motion.hero_stagger_ms);
        let pending_reveals = [
            BlockId::HeroTitle,
            BlockId::HeroTagline,
            BlockId::HeroCta,
        ]
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, splash_until + hero_step * u32::try_from(i).unwrap_or(0)))
        .collect();

        let float_pulse_ms = config.motion.float_pulse_ms;
        let mut model = Self {
            resize_debounce: Debouncer::new(config.carousel.resize_debounce()),
            scroll_throttle: Throttle::new(Duration::from_millis(config.scroll.throttle_ms)),
            config,
            content,
            theme,
            theme_source,
            accessibility: AccessibilityProfile::default(),
            terminal_size,
            scroll_px: 0.0,
            scroll_target_px: 0.0,
            active_section: Section::Home,
            nav_menu_open: false,
            nav_focus: 0,
            filter: FILTER_ALL.to_owned(),
            filter_options,
            revealed: HashSet::new(),
            pending_reveals,
            carousel,
            pointer_over_carousel: false,
            overlay: None,
            reservation: ReservationForm::default(),
            validator: FieldValidator::new(),
            press_flashes: Vec::new(),
            float_pulse_timer: Countdown::new(Duration::from_millis(
                float_pulse_ms,
            )),
            float_pulse_until: None,
            splash_until: Some(splash_until),
            layout: page,
            quit: false,
            tick: 0,
            notifications: Vec::new(),
            next_notification_id: 0,
            started_at: now,
        };
        model.reveal_pass(now);
        model
    }

    // ── geometry ──

    /// Virtual viewport width at the current terminal size.
    #[must_use]
    pub const fn viewport_width_px(&self) -> u32 {
        layout::viewport_width_px(self.terminal_size.0)
    }

    /// Largest legal scroll offset.
    #[must_use]
    pub fn max_scroll_px(&self) -> f64 {
        f64::from(self.layout.max_scroll_px(self.terminal_size.1))
    }

    /// Whether the compact ("hamburger") header is in effect.
    #[must_use]
    pub const fn compact(&self) -> bool {
        self.viewport_width_px() <= self.config.breakpoints.narrow_px
    }

    /// Whether the navbar is in its "scrolled" sticky treatment.
    #[must_use]
    pub fn navbar_scrolled(&self) -> bool {
        self.scroll_px > f64::from(self.config.scroll.sticky_threshold_px)
    }

    /// Whether the back-to-top control is visible.
    #[must_use]
    pub fn back_to_top_visible(&self) -> bool {
        self.scroll_px > f64::from(self.config.scroll.back_to_top_threshold_px)
    }

    /// Chrome snapshot for hit testing and rendering.
    #[must_use]
    pub fn chrome_state(&self) -> ChromeState {
        ChromeState {
            cols: self.terminal_size.0,
            rows: self.terminal_size.1,
            compact: self.compact(),
            nav_menu_open: self.nav_menu_open,
            modal_open: matches!(self.overlay, Some(Overlay::Reservation)),
            back_to_top_visible: self.back_to_top_visible(),
            filter_options: self.filter_options.len(),
            dot_count: self.carousel.indicators().len(),
        }
    }

    // ── reveal engine ──

    /// Whether a block should be painted this frame.
    #[must_use]
    pub fn is_block_visible(&self, id: BlockId) -> bool {
        match id {
            // Structural strips are never reveal-gated.
            BlockId::FilterBar | BlockId::CarouselDots | BlockId::HeroShape(_) => true,
            _ => self.revealed.contains(&id),
        }
    }

    /// One-way latch pass: reveal-candidate blocks that entered the viewport
    /// become visible. Blocks with a scheduled stagger keep their deadline.
    pub fn reveal_pass(&mut self, now: Instant) {
        let threshold = self.scroll_px + f64::from(layout::viewport_height_px(self.terminal_size.1))
            - f64::from(self.config.scroll.reveal_margin_px);
        let mut due = Vec::new();
        for block in &self.layout.blocks {
            if !block.reveal || self.revealed.contains(&block.id) {
                continue;
            }
            if self.pending_reveals.iter().any(|(id, _)| *id == block.id) {
                continue;
            }
            if f64::from(block.y_px) < threshold {
                due.push(block.id);
            }
        }
        self.revealed.extend(due);
        self.drain_due_reveals(now);
    }

    /// Move due staggered reveals into the revealed set.
    pub fn drain_due_reveals(&mut self, now: Instant) {
        let mut i = 0;
        while i < self.pending_reveals.len() {
            if self.pending_reveals[i].1 <= now {
                let (id, _) = self.pending_reveals.swap_remove(i);
                self.revealed.insert(id);
            } else {
                i += 1;
            }
        }
    }

    // ── filter ──

    /// Apply a filter selection: rebuild the page, un-reveal re-shown cards,
    /// and schedule their staggered re-entry. Returns the visible card count.
    pub fn set_filter(&mut self, index: usize, now: Instant) -> usize {
        if let Some(choice) = self.filter_options.get(index) {
            self.filter.clone_from(choice);
        }
        self.rebuild_layout();

        let step = Duration::from_millis(self.config.motion.filter_stagger_ms);
        let visible = visible_indices(&self.content.menu, &self.filter);
        self.pending_reveals
            .retain(|(id, _)| !matches!(id, BlockId::MenuCard(_)));
        for (slot, menu_index) in visible.iter().enumerate() {
            let id = BlockId::MenuCard(*menu_index);
            self.revealed.remove(&id);
            self.pending_reveals
                .push((id, now + step * u32::try_from(slot).unwrap_or(0)));
        }
        visible.len()
    }

    /// Advance to the next filter option, wrapping. Returns the new index.
    #[must_use]
    pub fn next_filter_index(&self) -> usize {
        let current = self
            .filter_options
            .iter()
            .position(|f| *f == self.filter)
            .unwrap_or(0);
        (current + 1) % self.filter_options.len().max(1)
    }

    /// Rebuild the virtual page for the current width and filter.
    pub fn rebuild_layout(&mut self) {
        self.layout = layout::build(
            &self.content,
            &self.filter,
            self.viewport_width_px(),
            self.config.breakpoints,
        );
    }

    // ── scrolling ──

    /// Set the smooth-scroll destination, clamped into range.
    pub fn scroll_to(&mut self, target_px: f64) {
        self.scroll_target_px = target_px.clamp(0.0, self.max_scroll_px());
    }

    /// Nudge the destination by a delta.
    pub fn scroll_by(&mut self, delta_px: f64) {
        self.scroll_to(self.scroll_target_px + delta_px);
    }

    /// One smooth-scroll step toward the destination. Returns `true` while
    /// still moving.
    pub fn smooth_scroll_step(&mut self) -> bool {
        let delta = self.scroll_target_px - self.scroll_px;
        if delta.abs() < 1.0 {
            self.scroll_px = self.scroll_target_px;
            return false;
        }
        // Ease out: cover 25% of the remaining distance, at least 4 px.
        let step = (delta * 0.25).abs().max(4.0).min(delta.abs());
        self.scroll_px += step.copysign(delta);
        true
    }

    /// Current scroll offset rounded to whole virtual pixels.
    #[must_use]
    pub fn scroll_px_rounded(&self) -> u32 {
        if self.scroll_px <= 0.0 {
            0
        } else {
            let clamped = self.scroll_px.min(f64::from(u32::MAX));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                clamped.round() as u32
            }
        }
    }

    /// Hero parallax shift for the current scroll, in virtual pixels.
    #[must_use]
    pub fn hero_parallax_px(&self) -> f64 {
        self.scroll_px * 0.5
    }

    /// Hero fade progress in `0.0..=1.0` (1 = fully faded out).
    #[must_use]
    pub fn hero_fade(&self) -> f64 {
        let hero_height = f64::from(self.layout.anchors.menu.max(1));
        (self.scroll_px / hero_height * 1.5).clamp(0.0, 1.0)
    }

    /// Drift offset for a decorative shape, scaled per index.
    #[must_use]
    pub fn shape_drift_px(&self, index: u8) -> f64 {
        let speed = 0.1f64.mul_add(f64::from(index), 0.3);
        self.scroll_px * speed
    }

    // ── notifications ──

    /// Push a toast, evicting the oldest if at capacity. Returns its ID.
    pub fn push_notification(
        &mut self,
        level: NotificationLevel,
        message: String,
        now: Instant,
    ) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            level,
            message,
            expires_at: now + NOTIFICATION_TTL,
        });
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        id
    }

    /// Drop expired toasts and press flashes; returns `true` if any expired.
    pub fn expire_transients(&mut self, now: Instant) -> bool {
        let before = self.notifications.len() + self.press_flashes.len();
        self.notifications.retain(|n| n.expires_at > now);
        self.press_flashes.retain(|(_, until)| *until > now);
        if let Some(until) = self.float_pulse_until
            && until <= now
        {
            self.float_pulse_until = None;
        }
        before != self.notifications.len() + self.press_flashes.len()
    }

    /// Record press feedback on a control.
    pub fn press_flash(&mut self, target: layout::HitTarget, now: Instant) {
        let until = now + Duration::from_millis(self.config.motion.press_flash_ms);
        self.press_flashes.push((target, until));
    }

    /// Whether a control is currently flashing.
    #[must_use]
    pub fn is_pressed(&self, target: layout::HitTarget) -> bool {
        self.press_flashes.iter().any(|(t, _)| *t == target)
    }
}

// ──────────────────── messages ────────────────────

/// Events that drive state transitions.
#[derive(Debug, Clone, Copy)]
pub enum KioskMsg {
    /// Frame tick — drives animation, timers, and debounced work.
    Tick,
    /// Terminal key press.
    Key(Key),
    /// Mouse movement, press, or wheel.
    Mouse(MouseInput),
    /// Terminal was resized.
    Resize { cols: u16, rows: u16 },
}

// ──────────────────── commands ────────────────────

/// Side-effects returned by the update function for the runtime to execute.
///
/// The update function never performs I/O directly, keeping the state
/// machine deterministic and testable.
#[derive(Debug)]
pub enum KioskCmd {
    /// No side-effect.
    None,
    /// Execute multiple commands.
    Batch(Vec<Self>),
    /// Terminate the event loop.
    Quit,
    /// Open a URL with the platform opener.
    OpenUrl(String),
    /// Persist the current theme flag (debounced by the runtime).
    SaveTheme,
    /// Record a session event.
    Log(SessionEvent),
}

// ──────────────────── tests ────────────────────
