#![forbid(unsafe_code)]

//! Warung Kiosk — terminal storefront for a small restaurant.
//!
//! The storefront behaviors of a marketing site, re-expressed for the
//! terminal:
//! 1. **Testimonial carousel** — width-responsive paging with auto-advance
//! 2. **Menu board** — category filter with staggered reveal
//! 3. **Reservation hand-off** — form → WhatsApp deep link
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use warung_kiosk::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use warung_kiosk::carousel::CarouselController;
//! use warung_kiosk::core::config::Config;
//! ```

pub mod prelude;

pub mod booking;
pub mod carousel;
pub mod content;
pub mod core;
pub mod logger;
pub mod timing;
pub mod ui;
