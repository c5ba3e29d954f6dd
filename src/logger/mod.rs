//! Session-event logging: JSONL append-only, written off-thread.

pub mod jsonl;
pub mod session;

pub use jsonl::{EventKind, LogEntry, Severity};
pub use session::{SessionEvent, SessionLogHandle, spawn_session_log};
