//! Elm-style UI: model / update / input / layout, with the crossterm
//! renderer and runtime behind the `tui` feature.
//!
//! The state machine (`model`/`update`/`input`/`layout`) is terminal-agnostic
//! and fully testable without a TTY; only `render` and `runtime` touch
//! crossterm.

pub mod input;
pub mod layout;
pub mod model;
pub mod preferences;
pub mod theme;
pub mod update;
pub mod widgets;

#[cfg(feature = "tui")]
pub mod render;
#[cfg(feature = "tui")]
pub mod runtime;

#[cfg(feature = "tui")]
pub use runtime::run;
