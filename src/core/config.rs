//! Configuration system: TOML file + env var overrides + smart defaults.
//!
//! Breakpoints and motion timings are centralized here so layout and behavior
//! consume the same named constants instead of duplicating magic numbers.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{KioskError, Result};
use crate::core::paths;

/// Full kiosk configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub breakpoints: Breakpoints,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub motion: MotionConfig,
    pub contact: ContactConfig,
    pub paths: PathsConfig,
}

/// Named viewport breakpoints, in virtual pixels.
///
/// A single source of truth shared by layout and the carousel capacity
/// function: at most `narrow_px` wide shows one card, at most `medium_px`
/// shows two, anything wider shows three.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Breakpoints {
    pub narrow_px: u32,
    pub medium_px: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow_px: 768,
            medium_px: 1024,
        }
    }
}

impl Breakpoints {
    /// Cards visible simultaneously for a given viewport width.
    #[must_use]
    pub const fn capacity_for(self, width_px: u32) -> usize {
        if width_px <= self.narrow_px {
            1
        } else if width_px <= self.medium_px {
            2
        } else {
            3
        }
    }
}

/// Testimonial carousel timings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CarouselConfig {
    /// Idle interval between automatic page advances.
    pub auto_advance_ms: u64,
    /// Trailing-edge debounce applied to resize bursts.
    pub resize_debounce_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 5000,
            resize_debounce_ms: 250,
        }
    }
}

impl CarouselConfig {
    #[must_use]
    pub const fn auto_advance(self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    #[must_use]
    pub const fn resize_debounce(self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Scroll-driven behavior thresholds, in virtual pixels unless noted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScrollConfig {
    /// Offset past which the navbar switches to its "scrolled" treatment.
    pub sticky_threshold_px: u32,
    /// Offset past which the back-to-top control becomes visible.
    pub back_to_top_threshold_px: u32,
    /// Margin from the viewport bottom at which a block counts as revealed.
    pub reveal_margin_px: u32,
    /// Header height subtracted when jumping to a section anchor.
    pub header_offset_px: u32,
    /// Margin used when deciding which section the viewport top is in.
    pub active_link_margin_px: u32,
    /// Throttle window for scroll-driven work.
    pub throttle_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            sticky_threshold_px: 50,
            back_to_top_threshold_px: 300,
            reveal_margin_px: 100,
            header_offset_px: 80,
            active_link_margin_px: 100,
            throttle_ms: 100,
        }
    }
}

/// Decorative motion timings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MotionConfig {
    /// Startup splash duration.
    pub splash_ms: u64,
    /// Press-feedback flash duration.
    pub press_flash_ms: u64,
    /// Stagger step between re-shown filtered cards.
    pub filter_stagger_ms: u64,
    /// Stagger step between hero blocks on load.
    pub hero_stagger_ms: u64,
    /// Repeat interval of the floating WhatsApp pulse while scrolling.
    pub float_pulse_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            splash_ms: 1500,
            press_flash_ms: 600,
            filter_stagger_ms: 50,
            hero_stagger_ms: 200,
            float_pulse_ms: 3000,
        }
    }
}

/// Restaurant identity and outbound contact details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    /// Display name used in the hero and the reservation template.
    pub restaurant_name: String,
    /// WhatsApp number in international format without `+` or leading zero.
    pub whatsapp_phone: String,
    /// Street-level blurb shown in the contact section.
    pub address: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            restaurant_name: "Warung Kumpul 88".to_owned(),
            whatsapp_phone: "6281280609087".to_owned(),
            address: "Citra Raya, Tangerang".to_owned(),
        }
    }
}

/// File locations used by the kiosk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub preferences_file: PathBuf,
    pub log_file: PathBuf,
    /// Optional TOML file replacing the built-in menu/testimonial content.
    pub content_file: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_file: paths::default_config_file(),
            preferences_file: paths::default_preferences_file(),
            log_file: paths::default_log_file(),
            content_file: None,
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from the default
    /// path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| KioskError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(KioskError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        set_env_u32(
            "WARUNG_BREAKPOINT_NARROW_PX",
            &mut self.breakpoints.narrow_px,
        )?;
        set_env_u32(
            "WARUNG_BREAKPOINT_MEDIUM_PX",
            &mut self.breakpoints.medium_px,
        )?;
        set_env_u64(
            "WARUNG_CAROUSEL_AUTO_ADVANCE_MS",
            &mut self.carousel.auto_advance_ms,
        )?;
        set_env_u64(
            "WARUNG_CAROUSEL_RESIZE_DEBOUNCE_MS",
            &mut self.carousel.resize_debounce_ms,
        )?;
        set_env_u64("WARUNG_SCROLL_THROTTLE_MS", &mut self.scroll.throttle_ms)?;
        set_env_u64("WARUNG_SPLASH_MS", &mut self.motion.splash_ms)?;

        if let Ok(phone) = env::var("WARUNG_WHATSAPP_PHONE") {
            self.contact.whatsapp_phone = phone;
        }
        if let Ok(file) = env::var("WARUNG_CONTENT_FILE") {
            self.paths.content_file = Some(PathBuf::from(file));
        }
        Ok(())
    }

    /// Reject configurations that would break the capacity invariant or
    /// disable the carousel timer entirely.
    pub fn validate(&self) -> Result<()> {
        if self.breakpoints.narrow_px >= self.breakpoints.medium_px {
            return Err(KioskError::InvalidConfig {
                details: format!(
                    "narrow breakpoint ({}) must be below medium ({})",
                    self.breakpoints.narrow_px, self.breakpoints.medium_px
                ),
            });
        }
        if self.carousel.auto_advance_ms == 0 {
            return Err(KioskError::InvalidConfig {
                details: "carousel auto_advance_ms must be positive".to_owned(),
            });
        }
        if self.contact.whatsapp_phone.is_empty()
            || !self.contact.whatsapp_phone.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(KioskError::InvalidConfig {
                details: format!(
                    "whatsapp_phone must be digits only, got {:?}",
                    self.contact.whatsapp_phone
                ),
            });
        }
        Ok(())
    }
}

fn set_env_u64(key: &str, target: &mut u64) -> Result<()> {
    if let Ok(raw) = env::var(key) {
        *target = raw.parse().map_err(|_| KioskError::InvalidConfig {
            details: format!("{key} must be an unsigned integer, got {raw:?}"),
        })?;
    }
    Ok(())
}

fn set_env_u32(key: &str, target: &mut u32) -> Result<()> {
    if let Ok(raw) = env::var(key) {
        *target = raw.parse().map_err(|_| KioskError::InvalidConfig {
            details: format!("{key} must be an unsigned integer, got {raw:?}"),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn capacity_matches_breakpoints() {
        let bp = Breakpoints::default();
        assert_eq!(bp.capacity_for(320), 1);
        assert_eq!(bp.capacity_for(768), 1);
        assert_eq!(bp.capacity_for(769), 2);
        assert_eq!(bp.capacity_for(1024), 2);
        assert_eq!(bp.capacity_for(1025), 3);
        assert_eq!(bp.capacity_for(1920), 3);
    }

    #[test]
    fn inverted_breakpoints_rejected() {
        let mut cfg = Config::default();
        cfg.breakpoints.narrow_px = 1200;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_auto_advance_rejected() {
        let mut cfg = Config::default();
        cfg.carousel.auto_advance_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_numeric_phone_rejected() {
        let mut cfg = Config::default();
        cfg.contact.whatsapp_phone = "+62 812".to_owned();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code(), "WK-1002");
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config::default();
        let raw = toml::to_string(&cfg).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[carousel]\nauto_advance_ms = 2000\n").unwrap();
        assert_eq!(cfg.carousel.auto_advance_ms, 2000);
        assert_eq!(cfg.carousel.resize_debounce_ms, 250);
        assert_eq!(cfg.breakpoints, Breakpoints::default());
    }
}
