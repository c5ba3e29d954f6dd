//! Shared path resolution for config, preferences, and log files.

use std::env;
use std::path::PathBuf;

/// Directory under `$HOME` holding kiosk state.
const STATE_DIR: &str = ".warung";

/// Resolve the kiosk state directory, honoring `WARUNG_STATE_DIR`.
///
/// Falls back to the current directory when `$HOME` is unset (e.g. bare CI
/// containers) so the kiosk still starts.
#[must_use]
pub fn state_dir() -> PathBuf {
    if let Some(dir) = env::var_os("WARUNG_STATE_DIR") {
        return PathBuf::from(dir);
    }
    env::var_os("HOME").map_or_else(
        || PathBuf::from("."),
        |home| PathBuf::from(home).join(STATE_DIR),
    )
}

/// Default config file path.
#[must_use]
pub fn default_config_file() -> PathBuf {
    state_dir().join("config.toml")
}

/// Default preferences file path (holds the persisted theme flag).
#[must_use]
pub fn default_preferences_file() -> PathBuf {
    state_dir().join("preferences.toml")
}

/// Default session log path.
#[must_use]
pub fn default_log_file() -> PathBuf {
    state_dir().join("session.jsonl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_share_the_state_dir() {
        let dir = state_dir();
        assert!(default_config_file().starts_with(&dir));
        assert!(default_preferences_file().starts_with(&dir));
        assert!(default_log_file().starts_with(&dir));
    }

    #[test]
    fn file_names_are_distinct() {
        assert_ne!(default_config_file(), default_preferences_file());
        assert_ne!(default_preferences_file(), default_log_file());
    }
}
