//! Persisted kiosk preferences with safe atomic persistence.
//!
//! The only durable state is the theme flag. The module is designed so that
//! persistence failures **never** block startup or rendering.
//!
//! # Persistence Strategy
//!
//! Atomic write: serialize → temp file → fsync → rename over target. Readers
//! never see a partial write. Debounce prevents rapid theme toggling from
//! thrashing disk.
//!
//! # Error Philosophy
//!
//! Load errors: fall back to compiled defaults (never panic).
//! Save errors: surface as a transient notification (never block).

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::ui::theme::Theme;

/// Current schema version. `#[serde(default)]` keeps additive changes
/// compatible without a bump.
const SCHEMA_VERSION: u32 = 1;

/// Minimum debounce interval between persisted writes.
const WRITE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Persisted kiosk preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskPreferences {
    /// Schema version for migration detection.
    pub schema_version: u32,
    /// Persisted theme flag.
    pub theme: Theme,
}

impl Default for KioskPreferences {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            theme: Theme::default(),
        }
    }
}

/// Source tier for the preferences in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSource {
    /// Built-in defaults (no file, or unreadable file).
    Defaults,
    /// Loaded from disk.
    Persisted,
}

/// Load preferences, falling back to defaults on any failure.
#[must_use]
pub fn load(path: &Path) -> (KioskPreferences, PreferenceSource) {
    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<KioskPreferences>(&raw) {
            Ok(prefs) => (prefs, PreferenceSource::Persisted),
            Err(_) => (KioskPreferences::default(), PreferenceSource::Defaults),
        },
        Err(_) => (KioskPreferences::default(), PreferenceSource::Defaults),
    }
}

/// Atomically persist preferences: temp file in the same directory, fsync,
/// rename over the target.
pub fn save(prefs: &KioskPreferences, path: &Path) -> io::Result<PathBuf> {
    let raw = toml::to_string_pretty(prefs).map_err(io::Error::other)?;

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let tmp = path.with_extension("toml.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(raw.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(path.to_path_buf())
}

/// Debounced writer that limits persistence frequency.
///
/// Call [`DebouncedWriter::request_save`] whenever the theme changes. The
/// writer delays the actual write until the debounce interval elapses,
/// coalescing rapid toggles into a single IO.
pub struct DebouncedWriter {
    path: PathBuf,
    debounce: Duration,
    last_write: Option<Instant>,
    pending: bool,
}

impl DebouncedWriter {
    /// Create a new writer targeting the given path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            debounce: WRITE_DEBOUNCE,
            last_write: None,
            pending: false,
        }
    }

    /// Override the debounce interval (useful for testing).
    #[must_use]
    pub fn with_debounce(mut self, d: Duration) -> Self {
        self.debounce = d;
        self
    }

    /// Mark that preferences have changed and should be persisted.
    pub fn request_save(&mut self) {
        self.pending = true;
    }

    /// Check if a save is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Attempt to flush if the debounce interval has elapsed. Returns
    /// `Some(Ok(path))` if a write happened, `Some(Err(e))` if it failed,
    /// or `None` if no write was needed yet.
    pub fn try_flush(
        &mut self,
        prefs: &KioskPreferences,
        now: Instant,
    ) -> Option<io::Result<PathBuf>> {
        if !self.pending {
            return None;
        }
        if let Some(last) = self.last_write
            && now.duration_since(last) < self.debounce
        {
            return None; // Too soon.
        }

        self.pending = false;
        self.last_write = Some(now);
        Some(save(prefs, &self.path))
    }

    /// Force an immediate write, bypassing debounce. Used on shutdown.
    pub fn force_flush(&mut self, prefs: &KioskPreferences) -> Option<io::Result<PathBuf>> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.last_write = Some(Instant::now());
        Some(save(prefs, &self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (prefs, source) = load(&dir.path().join("absent.toml"));
        assert_eq!(prefs, KioskPreferences::default());
        assert_eq!(source, PreferenceSource::Defaults);
    }

    #[test]
    fn save_then_load_round_trips_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        let prefs = KioskPreferences {
            theme: Theme::Dark,
            ..KioskPreferences::default()
        };
        save(&prefs, &path).unwrap();

        let (loaded, source) = load(&path);
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(source, PreferenceSource::Persisted);
        // No temp file left behind.
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "theme = 42\n").unwrap();
        let (prefs, source) = load(&path);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(source, PreferenceSource::Defaults);
    }

    #[test]
    fn debounced_writer_no_pending_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DebouncedWriter::new(dir.path().join("p.toml"));
        assert!(
            writer
                .try_flush(&KioskPreferences::default(), Instant::now())
                .is_none()
        );
    }

    #[test]
    fn debounced_writer_first_save_is_immediate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.toml");
        let mut writer = DebouncedWriter::new(path.clone()).with_debounce(Duration::ZERO);
        writer.request_save();
        let result = writer.try_flush(&KioskPreferences::default(), Instant::now());
        assert!(matches!(result, Some(Ok(_))));
        assert!(path.exists());
        assert!(!writer.is_pending());
    }

    #[test]
    fn debounce_coalesces_rapid_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DebouncedWriter::new(dir.path().join("p.toml"))
            .with_debounce(Duration::from_secs(2));
        let prefs = KioskPreferences::default();
        let start = Instant::now();

        writer.request_save();
        assert!(writer.try_flush(&prefs, start).is_some());

        // A second toggle right away is held back.
        writer.request_save();
        assert!(writer.try_flush(&prefs, start + Duration::from_millis(500)).is_none());
        assert!(writer.is_pending());

        // After the interval it lands.
        assert!(
            writer
                .try_flush(&prefs, start + Duration::from_secs(2))
                .is_some()
        );
    }

    #[test]
    fn force_flush_bypasses_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DebouncedWriter::new(dir.path().join("p.toml"));
        let prefs = KioskPreferences::default();
        writer.request_save();
        assert!(writer.try_flush(&prefs, Instant::now()).is_some());
        writer.request_save();
        assert!(matches!(writer.force_flush(&prefs), Some(Ok(_))));
        assert!(writer.force_flush(&prefs).is_none());
    }
}
