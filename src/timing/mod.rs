//! Generic timing wrappers: debounce, throttle, and a single-slot countdown.
//!
//! All three are deterministic over an injected `Instant`, so the state
//! machines built on top of them are testable without sleeping.

pub mod countdown;
pub mod debounce;
pub mod throttle;

pub use countdown::Countdown;
pub use debounce::Debouncer;
pub use throttle::Throttle;
