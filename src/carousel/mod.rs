//! Testimonial carousel: paging, indicators, and auto-advance ownership.

pub mod controller;

pub use controller::{CarouselController, Indicator};
