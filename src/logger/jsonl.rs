//! JSONL writer: append-only line-delimited JSON session log.
//!
//! Each line is a self-contained JSON object, assembled in memory and written
//! with a single `write_all` so tailing processes never see partial lines.
//!
//! Fallback chain:
//! 1. Primary file path
//! 2. stderr with `[WK-JSONL]` prefix
//! 3. Silent discard (the kiosk must never crash for logging failures)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Event types matching the kiosk activity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    KioskStart,
    KioskStop,
    ThemeChange,
    SectionView,
    FilterChange,
    CarouselPage,
    ReservationOpen,
    ReservationSubmit,
    ChatOpen,
    ContentFallback,
    Error,
}

/// A single JSONL log entry — all fields optional except `ts`, `event`,
/// `severity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    /// Event type identifier.
    pub event: EventKind,
    /// Severity level.
    pub severity: Severity,
    /// Section involved (when applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Filter category involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Carousel page index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Outbound link that was opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// WK error code if the event records a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Freeform details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// New entry stamped with the current UTC time.
    #[must_use]
    pub fn new(event: EventKind, severity: Severity) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
            severity,
            section: None,
            category: None,
            page: None,
            link: None,
            error_code: None,
            details: None,
        }
    }
}

/// Append-only JSONL file writer with stderr fallback.
pub struct JsonlWriter {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    degraded: bool,
}

impl JsonlWriter {
    /// Open (or create) the log file. Failure degrades to stderr mode.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let writer = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(BufWriter::new)
            .ok();
        let degraded = writer.is_none();
        Self {
            path,
            writer,
            degraded,
        }
    }

    /// Target path of the primary file.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Whether the writer fell back off the primary file.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Serialize and append one entry.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        let Ok(mut line) = serde_json::to_string(entry) else {
            return;
        };
        line.push('\n');

        if let Some(writer) = &mut self.writer {
            if writer.write_all(line.as_bytes()).is_ok() {
                return;
            }
            // File went away mid-session; degrade permanently.
            self.writer = None;
            self.degraded = true;
        }
        eprint!("[WK-JSONL] {line}");
    }

    /// Flush buffered lines to the OS.
    pub fn flush(&mut self) {
        if let Some(writer) = &mut self.writer {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_append_as_single_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let mut writer = JsonlWriter::open(path.clone());

        let mut entry = LogEntry::new(EventKind::FilterChange, Severity::Info);
        entry.category = Some("minuman".into());
        writer.write_entry(&entry);
        writer.write_entry(&LogEntry::new(EventKind::KioskStop, Severity::Info));
        writer.flush();

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: LogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.event, EventKind::FilterChange);
        assert_eq!(parsed.category.as_deref(), Some("minuman"));
        // None fields are omitted entirely.
        assert!(!lines[0].contains("error_code"));
    }

    #[test]
    fn missing_parent_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/session.jsonl");
        let mut writer = JsonlWriter::open(path.clone());
        assert!(!writer.is_degraded());
        writer.write_entry(&LogEntry::new(EventKind::KioskStart, Severity::Info));
        writer.flush();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_degrades_without_panic() {
        let mut writer = JsonlWriter::open(PathBuf::from("/proc/definitely/not/writable.jsonl"));
        assert!(writer.is_degraded());
        writer.write_entry(&LogEntry::new(EventKind::Error, Severity::Warning));
    }
}
