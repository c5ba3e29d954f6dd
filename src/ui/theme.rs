//! Theme model and semantic color tokens for kiosk rendering.

use std::env;

use serde::{Deserialize, Serialize};

/// Light/dark theme flag. This is the one piece of persisted state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Daylight palette.
    #[default]
    Light,
    /// After-dark palette.
    Dark,
}

impl Theme {
    /// Flip between light and dark.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable string form used in the preferences file and the log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse the persisted string form.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Semantic token category independent of concrete color codes.
///
/// The renderer maps (theme, token) to terminal colors; everything else
/// speaks in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticToken {
    /// Brand accent (headings, active controls).
    Accent,
    /// Primary body text.
    Body,
    /// De-emphasized text and separators.
    Muted,
    /// Positive feedback (reservation sent).
    Success,
    /// Warnings and degraded-mode notices.
    Warning,
    /// Inverted/selected surfaces (active filter button, active dot).
    Highlight,
}

/// Color output mode for compatibility with `NO_COLOR` and terminal policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors on.
    Enabled,
    /// Monochrome output.
    Disabled,
}

/// Accessibility knobs consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityProfile {
    /// Whether color output is allowed.
    pub color: ColorMode,
}

impl Default for AccessibilityProfile {
    fn default() -> Self {
        Self {
            color: ColorMode::Enabled,
        }
    }
}

impl AccessibilityProfile {
    /// Build from an explicit no-color flag.
    #[must_use]
    pub const fn from_no_color_flag(no_color: bool) -> Self {
        Self {
            color: if no_color {
                ColorMode::Disabled
            } else {
                ColorMode::Enabled
            },
        }
    }

    /// Honor the `NO_COLOR` convention.
    #[must_use]
    pub fn from_environment() -> Self {
        Self::from_no_color_flag(env::var_os("NO_COLOR").is_some())
    }

    /// Whether colors are suppressed.
    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }
}
