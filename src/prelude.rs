//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use warung_kiosk::prelude::*;
//! ```

// Core
pub use crate::core::config::{Breakpoints, Config};
pub use crate::core::errors::{KioskError, Result};

// Content
pub use crate::content::SiteContent;
pub use crate::content::menu::{FILTER_ALL, MenuItem};
pub use crate::content::testimonials::Testimonial;

// Carousel
pub use crate::carousel::{CarouselController, Indicator};

// Booking
pub use crate::booking::form::{FieldId, ReservationForm};
pub use crate::booking::whatsapp::{chat_link, reservation_link, reservation_message};

// Timing
pub use crate::timing::{Countdown, Debouncer, Throttle};

// UI state machine
pub use crate::ui::model::{KioskCmd, KioskModel, KioskMsg, Section};
pub use crate::ui::theme::Theme;
pub use crate::ui::update::update;
