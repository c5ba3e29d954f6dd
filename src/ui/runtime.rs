//! Kiosk runtime: terminal lifecycle, event loop, and command execution.
//!
//! The loop polls terminal events, feeds them through the pure update
//! function, executes the returned commands, and repaints. All I/O lives
//! here; the state machine never touches the terminal.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::execute;
use url::Url;

use crate::booking::whatsapp::open_in_browser;
use crate::content::SiteContent;
use crate::core::config::Config;
use crate::core::errors::{KioskError, Result};
use crate::logger::{SessionEvent, SessionLogHandle, spawn_session_log};
use crate::ui::input::{key_from_crossterm, mouse_from_crossterm};
use crate::ui::model::{KioskCmd, KioskModel, KioskMsg, NotificationLevel};
use crate::ui::preferences::{self, DebouncedWriter, KioskPreferences};
use crate::ui::render;
use crate::ui::theme::AccessibilityProfile;
use crate::ui::update::update;

/// Poll window per loop iteration (~20 fps).
const FRAME_POLL: Duration = Duration::from_millis(50);

// ──────────────────── terminal guard ────────────────────

/// Global flag indicating raw mode is active. Checked by the panic hook to
/// decide whether terminal restoration is needed.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// RAII guard for the terminal lifecycle.
///
/// On creation: raw mode, alternate screen, mouse capture, hidden cursor.
/// On drop: everything restored. A panic hook restores the terminal before
/// the default panic message prints, so the backtrace is readable.
pub struct TerminalGuard {
    hook_installed: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen, installing a panic-safe
    /// cleanup hook.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal_best_effort();
            prev(info);
        }));

        Ok(Self {
            hook_installed: true,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal_best_effort();
        if self.hook_installed {
            // The previous hook was moved into our closure; reset to default.
            let _ = panic::take_hook();
        }
    }
}

/// Best-effort terminal restoration. Safe to call multiple times.
fn restore_terminal_best_effort() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

// ──────────────────── entrypoint ────────────────────

/// Run the kiosk until the user quits.
///
/// # Errors
/// Returns configuration/runtime failures; missing content degrades to the
/// built-in storefront instead of failing.
pub fn run(config: Config, no_color: bool) -> Result<()> {
    let (content, content_err) =
        SiteContent::load_or_builtin(config.paths.content_file.as_deref());
    let (prefs, theme_source) = preferences::load(&config.paths.preferences_file);

    let log = spawn_session_log(config.paths.log_file.clone())?;
    log.send(SessionEvent::KioskStarted {
        version: env!("CARGO_PKG_VERSION").to_owned(),
    });
    if let Some(err) = content_err {
        log.send(SessionEvent::ContentFallback {
            details: err.to_string(),
        });
    }

    let guard = TerminalGuard::new().map_err(|err| KioskError::Runtime {
        details: format!("terminal setup failed: {err}"),
    })?;

    let size = terminal::size().unwrap_or((80, 24));
    let now = Instant::now();
    let mut model = KioskModel::new(config, content, prefs.theme, theme_source, size, now);
    model.accessibility = if no_color {
        AccessibilityProfile::from_no_color_flag(true)
    } else {
        AccessibilityProfile::from_environment()
    };

    let mut prefs_state = prefs;
    let mut prefs_writer = DebouncedWriter::new(model.config.paths.preferences_file.clone());

    let result = run_loop(&mut model, &mut prefs_state, &mut prefs_writer, &log);

    // Always restore terminal state before final log writes.
    drop(guard);
    if let Some(Err(err)) = prefs_writer.force_flush(&prefs_state) {
        log.send(SessionEvent::Error {
            code: "WK-4001".to_owned(),
            message: format!("preferences flush failed: {err}"),
        });
    }
    log.shutdown();

    result.map_err(|err| KioskError::Runtime {
        details: err.to_string(),
    })
}

// ──────────────────── event loop ────────────────────

fn run_loop(
    model: &mut KioskModel,
    prefs: &mut KioskPreferences,
    prefs_writer: &mut DebouncedWriter,
    log: &SessionLogHandle,
) -> io::Result<()> {
    let mut stdout = io::stdout();

    loop {
        if event::poll(FRAME_POLL)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(mapped) = key_from_crossterm(&key) {
                        let cmd = update(model, KioskMsg::Key(mapped), now);
                        execute_cmd(cmd, model, prefs, prefs_writer, log, now);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(mapped) = mouse_from_crossterm(&mouse) {
                        let cmd = update(model, KioskMsg::Mouse(mapped), now);
                        execute_cmd(cmd, model, prefs, prefs_writer, log, now);
                    }
                }
                Event::Resize(cols, rows) => {
                    let cmd = update(model, KioskMsg::Resize { cols, rows }, now);
                    execute_cmd(cmd, model, prefs, prefs_writer, log, now);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let cmd = update(model, KioskMsg::Tick, now);
        execute_cmd(cmd, model, prefs, prefs_writer, log, now);

        if model.quit {
            return Ok(());
        }

        render::render_frame(&mut stdout, model)?;

        if let Some(Err(err)) = prefs_writer.try_flush(prefs, now) {
            model.push_notification(
                NotificationLevel::Warning,
                format!("gagal menyimpan tema: {err}"),
                now,
            );
        }
    }
}

// ──────────────────── command execution ────────────────────

fn execute_cmd(
    cmd: KioskCmd,
    model: &mut KioskModel,
    prefs: &mut KioskPreferences,
    prefs_writer: &mut DebouncedWriter,
    log: &SessionLogHandle,
    now: Instant,
) {
    match cmd {
        KioskCmd::None | KioskCmd::Quit => {}
        KioskCmd::Batch(cmds) => {
            for inner in cmds {
                execute_cmd(inner, model, prefs, prefs_writer, log, now);
            }
        }
        KioskCmd::OpenUrl(raw) => {
            let outcome = Url::parse(&raw)
                .map_err(KioskError::from)
                .and_then(|url| open_in_browser(&url));
            if let Err(err) = outcome {
                // Feature-inactive degrade: toast + log, never a crash.
                model.push_notification(
                    NotificationLevel::Warning,
                    "tidak bisa membuka tautan WhatsApp".to_owned(),
                    now,
                );
                log.send(SessionEvent::Error {
                    code: err.code().to_owned(),
                    message: err.to_string(),
                });
            }
        }
        KioskCmd::SaveTheme => {
            prefs.theme = model.theme;
            prefs_writer.request_save();
        }
        KioskCmd::Log(event) => log.send(event),
    }
}
