//! WK-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, KioskError>;

/// Top-level error type for the warung kiosk.
#[derive(Debug, Error)]
pub enum KioskError {
    #[error("[WK-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[WK-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[WK-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[WK-2001] content load failure for {path}: {details}")]
    ContentLoad { path: PathBuf, details: String },

    #[error("[WK-2002] content parse failure in {context}: {details}")]
    ContentParse {
        context: &'static str,
        details: String,
    },

    #[error("[WK-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[WK-3001] invalid reservation field {field}: {details}")]
    InvalidReservation {
        field: &'static str,
        details: String,
    },

    #[error("[WK-3002] link construction failure: {details}")]
    LinkConstruction { details: String },

    #[error("[WK-3003] failed to launch URL opener: {details}")]
    OpenerSpawn { details: String },

    #[error("[WK-4001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[WK-4002] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[WK-4900] runtime failure: {details}")]
    Runtime { details: String },
}

impl KioskError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "WK-1001",
            Self::MissingConfig { .. } => "WK-1002",
            Self::ConfigParse { .. } => "WK-1003",
            Self::ContentLoad { .. } => "WK-2001",
            Self::ContentParse { .. } => "WK-2002",
            Self::Serialization { .. } => "WK-2101",
            Self::InvalidReservation { .. } => "WK-3001",
            Self::LinkConstruction { .. } => "WK-3002",
            Self::OpenerSpawn { .. } => "WK-3003",
            Self::Io { .. } => "WK-4001",
            Self::ChannelClosed { .. } => "WK-4002",
            Self::Runtime { .. } => "WK-4900",
        }
    }

    /// Whether the failure should degrade a feature to inactive rather than
    /// abort the kiosk. Everything user-facing degrades; only configuration
    /// problems at startup are fatal.
    #[must_use]
    pub const fn is_degradable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidConfig { .. } | Self::MissingConfig { .. } | Self::ConfigParse { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for KioskError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<toml::ser::Error> for KioskError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialization {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for KioskError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<url::ParseError> for KioskError {
    fn from(value: url::ParseError) -> Self {
        Self::LinkConstruction {
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = KioskError::InvalidConfig {
            details: "x".into(),
        };
        assert_eq!(err.code(), "WK-1001");
        assert!(err.to_string().starts_with("[WK-1001]"));

        let err = KioskError::LinkConstruction {
            details: "bad".into(),
        };
        assert_eq!(err.code(), "WK-3002");
    }

    #[test]
    fn config_errors_are_fatal_rest_degrade() {
        assert!(
            !KioskError::MissingConfig {
                path: PathBuf::from("/nope")
            }
            .is_degradable()
        );
        assert!(
            KioskError::ContentLoad {
                path: PathBuf::from("/menu.toml"),
                details: "gone".into()
            }
            .is_degradable()
        );
    }

    #[test]
    fn io_constructor_keeps_path() {
        let err = KioskError::io("/tmp/x", std::io::Error::other("boom"));
        assert!(err.to_string().contains("/tmp/x"));
    }
}
