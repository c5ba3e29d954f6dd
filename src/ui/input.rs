//! Input routing: deterministic key precedence and mouse resolution.
//!
//! Keys resolve through precedence tiers: overlay keys first, then the open
//! nav drawer, then global keys. The Left/Right carousel arrows are global —
//! they page the testimonials regardless of where focus sits.
//!
//! [`Key`] and [`MouseInput`] are terminal-agnostic so the state machine can
//! be driven from tests; the crossterm conversions live behind the `tui`
//! feature.

#![allow(missing_docs)]

use crate::booking::form::FieldId;
use crate::ui::model::{Overlay, Section};

// ──────────────────── event types ────────────────────

/// Terminal-agnostic key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Terminal-agnostic mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseInput {
    /// Pointer moved to a cell.
    Moved { col: u16, row: u16 },
    /// Primary button pressed at a cell.
    Down { col: u16, row: u16 },
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
}

// ──────────────────── actions ────────────────────

/// Resolved intent of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    CloseOverlay,
    OpenHelp,
    ToggleTheme,
    ToggleNavMenu,
    NavFocusNext,
    NavFocusPrev,
    NavActivate,
    Navigate(Section),
    CarouselPrev,
    CarouselNext,
    BackToTop,
    /// Scroll by whole lines (positive = down).
    ScrollLines(i16),
    /// Scroll by pages (positive = down).
    ScrollPages(i16),
    CycleFilter,
    OpenReservation,
    OpenChat,
    FieldNext,
    FieldPrev,
    TypeChar(char),
    EraseChar,
    SubmitReservation,
}

/// Outcome of routing a key through the precedence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputResolution {
    /// Action to apply, if the key mapped to one.
    pub action: Option<InputAction>,
    /// Whether the key was consumed by its tier even without an action.
    pub consumed: bool,
}

impl InputResolution {
    const fn action(action: InputAction) -> Self {
        Self {
            action: Some(action),
            consumed: true,
        }
    }

    const fn consumed_without_action() -> Self {
        Self {
            action: None,
            consumed: true,
        }
    }
}

/// Precedence context for key resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputContext {
    /// Active overlay, if any. Overlays take the whole keyboard.
    pub overlay: Option<Overlay>,
    /// Whether the compact nav drawer is open.
    pub nav_menu_open: bool,
}

/// Resolve a key event using deterministic precedence rules.
#[must_use]
pub fn resolve_key(key: Key, context: InputContext) -> InputResolution {
    if let Some(overlay) = context.overlay {
        return resolve_overlay_key(key, overlay);
    }
    if context.nav_menu_open
        && let Some(resolution) = resolve_nav_drawer_key(key)
    {
        return resolution;
    }
    resolve_global_key(key)
}

fn resolve_overlay_key(key: Key, overlay: Overlay) -> InputResolution {
    match overlay {
        Overlay::Help => match key {
            Key::Esc | Key::Enter | Key::Char('q' | '?') => {
                InputResolution::action(InputAction::CloseOverlay)
            }
            _ => InputResolution::consumed_without_action(),
        },
        Overlay::Reservation => match key {
            Key::Esc => InputResolution::action(InputAction::CloseOverlay),
            Key::Enter => InputResolution::action(InputAction::SubmitReservation),
            Key::Tab | Key::Down => InputResolution::action(InputAction::FieldNext),
            Key::BackTab | Key::Up => InputResolution::action(InputAction::FieldPrev),
            Key::Backspace => InputResolution::action(InputAction::EraseChar),
            Key::Char(c) => InputResolution::action(InputAction::TypeChar(c)),
            _ => InputResolution::consumed_without_action(),
        },
    }
}

/// Focus walk across nav links while the drawer is open. Returns `None` for
/// keys the drawer does not own, which fall through to the global tier.
fn resolve_nav_drawer_key(key: Key) -> Option<InputResolution> {
    match key {
        Key::Down => Some(InputResolution::action(InputAction::NavFocusNext)),
        Key::Up => Some(InputResolution::action(InputAction::NavFocusPrev)),
        Key::Enter => Some(InputResolution::action(InputAction::NavActivate)),
        Key::Esc | Key::Char('m') => Some(InputResolution::action(InputAction::ToggleNavMenu)),
        _ => None,
    }
}

fn resolve_global_key(key: Key) -> InputResolution {
    match key {
        Key::Char('q') | Key::Esc => InputResolution::action(InputAction::Quit),
        Key::Char('?') => InputResolution::action(InputAction::OpenHelp),
        Key::Char('t') => InputResolution::action(InputAction::ToggleTheme),
        Key::Char('m') => InputResolution::action(InputAction::ToggleNavMenu),
        Key::Char('f') => InputResolution::action(InputAction::CycleFilter),
        Key::Char('r') => InputResolution::action(InputAction::OpenReservation),
        Key::Char('w') => InputResolution::action(InputAction::OpenChat),
        Key::Char('g') | Key::Home => InputResolution::action(InputAction::BackToTop),
        Key::End => InputResolution::action(InputAction::ScrollPages(i16::MAX)),
        // Global carousel paging, independent of focus.
        Key::Left => InputResolution::action(InputAction::CarouselPrev),
        Key::Right => InputResolution::action(InputAction::CarouselNext),
        Key::Char('j') | Key::Down => InputResolution::action(InputAction::ScrollLines(3)),
        Key::Char('k') | Key::Up => InputResolution::action(InputAction::ScrollLines(-3)),
        Key::PageDown => InputResolution::action(InputAction::ScrollPages(1)),
        Key::PageUp => InputResolution::action(InputAction::ScrollPages(-1)),
        Key::Char(c) => {
            if let Some(section) = c.to_digit(10).and_then(|d| {
                u8::try_from(d).ok().and_then(Section::from_number)
            }) {
                InputResolution::action(InputAction::Navigate(section))
            } else {
                InputResolution::consumed_without_action()
            }
        }
        Key::Enter | Key::Tab | Key::BackTab | Key::Backspace => {
            InputResolution::consumed_without_action()
        }
    }
}

// ──────────────────── crossterm conversions ────────────────────

#[cfg(feature = "tui")]
mod convert {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use super::{Key, MouseInput};

    /// Map a crossterm key event. Returns `None` for keys the kiosk ignores.
    /// `Ctrl-C` maps to `Esc` so it always reaches the quit path in raw mode.
    #[must_use]
    pub fn key_from_crossterm(event: &KeyEvent) -> Option<Key> {
        if event.modifiers.contains(KeyModifiers::CONTROL)
            && event.code == KeyCode::Char('c')
        {
            return Some(Key::Esc);
        }
        match event.code {
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Tab => Some(Key::Tab),
            KeyCode::BackTab => Some(Key::BackTab),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            KeyCode::PageUp => Some(Key::PageUp),
            KeyCode::PageDown => Some(Key::PageDown),
            _ => None,
        }
    }

    /// Map a crossterm mouse event. Returns `None` for kinds the kiosk
    /// ignores (drag, release, other buttons).
    #[must_use]
    pub fn mouse_from_crossterm(event: &MouseEvent) -> Option<MouseInput> {
        match event.kind {
            MouseEventKind::Moved => Some(MouseInput::Moved {
                col: event.column,
                row: event.row,
            }),
            MouseEventKind::Down(MouseButton::Left) => Some(MouseInput::Down {
                col: event.column,
                row: event.row,
            }),
            MouseEventKind::ScrollUp => Some(MouseInput::WheelUp),
            MouseEventKind::ScrollDown => Some(MouseInput::WheelDown),
            _ => None,
        }
    }
}

#[cfg(feature = "tui")]
pub use convert::{key_from_crossterm, mouse_from_crossterm};

// ──────────────────── tests ────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_are_global_carousel_keys() {
        let ctx = InputContext::default();
        assert_eq!(
            resolve_key(Key::Left, ctx).action,
            Some(InputAction::CarouselPrev)
        );
        assert_eq!(
            resolve_key(Key::Right, ctx).action,
            Some(InputAction::CarouselNext)
        );
        // Still global with the nav drawer open.
        let drawer = InputContext {
            nav_menu_open: true,
            ..InputContext::default()
        };
        assert_eq!(
            resolve_key(Key::Left, drawer).action,
            Some(InputAction::CarouselPrev)
        );
    }

    #[test]
    fn overlay_takes_the_keyboard() {
        let modal = InputContext {
            overlay: Some(Overlay::Reservation),
            ..InputContext::default()
        };
        // 'q' types into the form instead of quitting.
        assert_eq!(
            resolve_key(Key::Char('q'), modal).action,
            Some(InputAction::TypeChar('q'))
        );
        assert_eq!(
            resolve_key(Key::Esc, modal).action,
            Some(InputAction::CloseOverlay)
        );
        assert_eq!(
            resolve_key(Key::Enter, modal).action,
            Some(InputAction::SubmitReservation)
        );
        // Arrows walk fields, not the carousel, while the form is open.
        assert_eq!(
            resolve_key(Key::Down, modal).action,
            Some(InputAction::FieldNext)
        );
    }

    #[test]
    fn help_overlay_closes_on_dismiss_keys() {
        let help = InputContext {
            overlay: Some(Overlay::Help),
            ..InputContext::default()
        };
        for key in [Key::Esc, Key::Enter, Key::Char('q'), Key::Char('?')] {
            assert_eq!(
                resolve_key(key, help).action,
                Some(InputAction::CloseOverlay)
            );
        }
        let res = resolve_key(Key::Char('x'), help);
        assert_eq!(res.action, None);
        assert!(res.consumed);
    }

    #[test]
    fn nav_drawer_owns_the_focus_walk() {
        let drawer = InputContext {
            nav_menu_open: true,
            ..InputContext::default()
        };
        assert_eq!(
            resolve_key(Key::Down, drawer).action,
            Some(InputAction::NavFocusNext)
        );
        assert_eq!(
            resolve_key(Key::Up, drawer).action,
            Some(InputAction::NavFocusPrev)
        );
        assert_eq!(
            resolve_key(Key::Enter, drawer).action,
            Some(InputAction::NavActivate)
        );
        // Non-drawer keys fall through to the global tier.
        assert_eq!(
            resolve_key(Key::Char('t'), drawer).action,
            Some(InputAction::ToggleTheme)
        );
    }

    #[test]
    fn number_keys_jump_to_sections() {
        let ctx = InputContext::default();
        assert_eq!(
            resolve_key(Key::Char('1'), ctx).action,
            Some(InputAction::Navigate(Section::Home))
        );
        assert_eq!(
            resolve_key(Key::Char('4'), ctx).action,
            Some(InputAction::Navigate(Section::Contact))
        );
        let res = resolve_key(Key::Char('9'), ctx);
        assert_eq!(res.action, None);
    }
}
