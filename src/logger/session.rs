//! Background session logger: a dedicated thread owns the JSONL writer.
//!
//! All other threads send [`SessionEvent`] via a bounded crossbeam channel.
//! Non-blocking `try_send()` ensures the UI loop is never blocked by logging
//! back-pressure; a full channel drops the event and counts it.

#![allow(missing_docs)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::Mutex;

use crate::core::errors::{KioskError, Result};
use crate::logger::jsonl::{EventKind, JsonlWriter, LogEntry, Severity};

/// Bounded channel capacity for session events.
const CHANNEL_CAPACITY: usize = 256;

/// Events recorded over a kiosk session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    KioskStarted { version: String },
    KioskStopped { uptime_secs: u64 },
    ThemeChanged { theme: String },
    SectionViewed { section: String },
    FilterChanged { category: String, visible: usize },
    CarouselPage { page: usize },
    ReservationOpened,
    ReservationSubmitted { link: String },
    ChatOpened { link: String },
    ContentFallback { details: String },
    Error { code: String, message: String },
    /// Sentinel requesting graceful shutdown of the logger thread.
    Shutdown,
}

impl SessionEvent {
    fn into_entry(self) -> Option<LogEntry> {
        let entry = match self {
            Self::KioskStarted { version } => {
                let mut e = LogEntry::new(EventKind::KioskStart, Severity::Info);
                e.details = Some(version);
                e
            }
            Self::KioskStopped { uptime_secs } => {
                let mut e = LogEntry::new(EventKind::KioskStop, Severity::Info);
                e.details = Some(format!("uptime {uptime_secs}s"));
                e
            }
            Self::ThemeChanged { theme } => {
                let mut e = LogEntry::new(EventKind::ThemeChange, Severity::Info);
                e.details = Some(theme);
                e
            }
            Self::SectionViewed { section } => {
                let mut e = LogEntry::new(EventKind::SectionView, Severity::Info);
                e.section = Some(section);
                e
            }
            Self::FilterChanged { category, visible } => {
                let mut e = LogEntry::new(EventKind::FilterChange, Severity::Info);
                e.category = Some(category);
                e.details = Some(format!("{visible} cards visible"));
                e
            }
            Self::CarouselPage { page } => {
                let mut e = LogEntry::new(EventKind::CarouselPage, Severity::Info);
                e.page = Some(page);
                e
            }
            Self::ReservationOpened => LogEntry::new(EventKind::ReservationOpen, Severity::Info),
            Self::ReservationSubmitted { link } => {
                let mut e = LogEntry::new(EventKind::ReservationSubmit, Severity::Info);
                e.link = Some(link);
                e
            }
            Self::ChatOpened { link } => {
                let mut e = LogEntry::new(EventKind::ChatOpen, Severity::Info);
                e.link = Some(link);
                e
            }
            Self::ContentFallback { details } => {
                let mut e = LogEntry::new(EventKind::ContentFallback, Severity::Warning);
                e.details = Some(details);
                e
            }
            Self::Error { code, message } => {
                let mut e = LogEntry::new(EventKind::Error, Severity::Warning);
                e.error_code = Some(code);
                e.details = Some(message);
                e
            }
            Self::Shutdown => return None,
        };
        Some(entry)
    }
}

/// Thread-safe, cheaply-cloneable handle for sending session events.
#[derive(Clone)]
pub struct SessionLogHandle {
    tx: Sender<SessionEvent>,
    dropped_events: Arc<AtomicU64>,
    join: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionLogHandle {
    /// Send an event to the logger thread. Non-blocking; a full channel
    /// drops the event and increments the dropped-events counter.
    pub fn send(&self, event: SessionEvent) {
        if let Err(TrySendError::Full(_)) = self.tx.try_send(event) {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
        }
        // Disconnected is fine during shutdown.
    }

    /// Number of events dropped due to channel back-pressure.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events.load(Ordering::Relaxed)
    }

    /// Request graceful shutdown and join the logger thread.
    pub fn shutdown(&self) {
        let _ = self.tx.send(SessionEvent::Shutdown);
        if let Some(join) = self.join.lock().take() {
            let _ = join.join();
        }
    }
}

/// Spawn the session logger thread and return its handle.
pub fn spawn_session_log(path: PathBuf) -> Result<SessionLogHandle> {
    let (tx, rx) = bounded::<SessionEvent>(CHANNEL_CAPACITY);
    let dropped = Arc::new(AtomicU64::new(0));
    let dropped_clone = Arc::clone(&dropped);

    let join = thread::Builder::new()
        .name("warung-logger".to_owned())
        .spawn(move || logger_thread_main(&rx, path, &dropped_clone))
        .map_err(|e| KioskError::Runtime {
            details: format!("failed to spawn logger thread: {e}"),
        })?;

    Ok(SessionLogHandle {
        tx,
        dropped_events: dropped,
        join: Arc::new(Mutex::new(Some(join))),
    })
}

fn logger_thread_main(rx: &Receiver<SessionEvent>, path: PathBuf, dropped: &Arc<AtomicU64>) {
    let mut jsonl = JsonlWriter::open(path);

    while let Ok(event) = rx.recv() {
        let lost = dropped.swap(0, Ordering::Relaxed);
        if lost > 0 {
            let mut warn = LogEntry::new(EventKind::Error, Severity::Warning);
            warn.details = Some(format!("{lost} log events dropped due to back-pressure"));
            jsonl.write_entry(&warn);
        }

        let shutdown = matches!(event, SessionEvent::Shutdown);
        if let Some(entry) = event.into_entry() {
            jsonl.write_entry(&entry);
        }
        if shutdown {
            jsonl.flush();
            break;
        }
    }
    jsonl.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn events_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let handle = spawn_session_log(path.clone()).unwrap();

        handle.send(SessionEvent::KioskStarted {
            version: "0.1.0".into(),
        });
        handle.send(SessionEvent::FilterChanged {
            category: "minuman".into(),
            visible: 4,
        });
        handle.shutdown();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.contains("kiosk_start"));
        assert!(raw.contains("minuman"));
    }

    #[test]
    fn shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let handle = spawn_session_log(dir.path().join("s.jsonl")).unwrap();
        handle.shutdown();
        handle.shutdown();
        assert_eq!(handle.dropped_events(), 0);
    }

    #[test]
    fn sends_after_shutdown_are_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let handle = spawn_session_log(dir.path().join("s.jsonl")).unwrap();
        handle.shutdown();
        handle.send(SessionEvent::ReservationOpened);
    }
}
