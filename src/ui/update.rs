//! Pure update function for the kiosk state machine.
//!
//! `update()` takes the current model, a message, and the current instant,
//! mutates the model, and returns a command describing any side-effects the
//! runtime should execute.
//!
//! **Design invariant:** this module performs zero I/O. All effects are
//! described as [`KioskCmd`] values.

#![allow(clippy::too_many_lines)]

use std::time::{Duration, Instant};

use crate::booking::whatsapp::{chat_link, reservation_link};
use crate::logger::SessionEvent;
use crate::ui::input::{self, InputAction, InputContext, Key, MouseInput};
use crate::ui::layout::{self, HitTarget};
use crate::ui::model::{
    KioskCmd, KioskModel, KioskMsg, NotificationLevel, Overlay, Section,
};

/// Pulse flash length once the float timer fires.
const PULSE_FLASH: Duration = Duration::from_secs(1);

/// Apply a message to the model and return the next command for the runtime.
///
/// Every state transition goes through this function, making the kiosk
/// deterministic and testable.
pub fn update(model: &mut KioskModel, msg: KioskMsg, now: Instant) -> KioskCmd {
    match msg {
        KioskMsg::Tick => handle_tick(model, now),
        KioskMsg::Key(key) => {
            let context = InputContext {
                overlay: model.overlay,
                nav_menu_open: model.nav_menu_open,
            };
            let resolution = input::resolve_key(key, context);
            resolution
                .action
                .map_or(KioskCmd::None, |action| apply_input_action(model, action, now))
        }
        KioskMsg::Mouse(mouse) => handle_mouse(model, mouse, now),
        KioskMsg::Resize { cols, rows } => {
            // Dimensions update immediately so painting never lags the
            // terminal; capacity/page recomputation waits out the burst.
            model.terminal_size = (cols, rows);
            model.resize_debounce.submit((cols, rows), now);
            KioskCmd::None
        }
    }
}

// ──────────────────── tick ────────────────────

fn handle_tick(model: &mut KioskModel, now: Instant) -> KioskCmd {
    model.tick = model.tick.wrapping_add(1);
    let mut cmds = Vec::new();

    // Splash dismissal.
    if let Some(until) = model.splash_until
        && until <= now
    {
        model.splash_until = None;
    }

    // Debounced resize settled: recompute capacity, pages, layout.
    if let Some((cols, _rows)) = model.resize_debounce.poll(now) {
        let width_px = layout::viewport_width_px(cols);
        model.carousel.apply_resize(width_px, now);
        model.rebuild_layout();
        model.scroll_to(model.scroll_target_px);
        model.scroll_px = model.scroll_px.min(model.max_scroll_px());
        model.reveal_pass(now);
    }

    // Smooth scroll + throttled scroll work.
    let moving = model.smooth_scroll_step();
    if moving && model.scroll_throttle.allow(now) {
        scroll_work(model, now);
    }

    // Float pulse fires 3 s after the last scroll activity, repeating.
    if model.float_pulse_timer.poll(now) {
        model.float_pulse_until = Some(now + PULSE_FLASH);
    }

    model.reveal_pass(now);
    model.expire_transients(now);

    if model.carousel.poll_autoplay(now) {
        cmds.push(KioskCmd::Log(SessionEvent::CarouselPage {
            page: model.carousel.current_page(),
        }));
    }

    batch(cmds)
}

/// Scroll-driven work, rate-limited by the throttle: active-link tracking
/// and the float pulse schedule restart.
fn scroll_work(model: &mut KioskModel, now: Instant) {
    model.active_section = model
        .layout
        .anchors
        .section_at(model.scroll_px_rounded(), model.config.scroll.active_link_margin_px);
    model.float_pulse_timer.start(now);
}

// ──────────────────── keys ────────────────────

/// Translate a resolved [`InputAction`] into model mutations and a command.
fn apply_input_action(model: &mut KioskModel, action: InputAction, now: Instant) -> KioskCmd {
    match action {
        InputAction::Quit => {
            model.quit = true;
            batch(vec![
                KioskCmd::Log(SessionEvent::KioskStopped {
                    uptime_secs: now.duration_since(model.started_at).as_secs(),
                }),
                KioskCmd::Quit,
            ])
        }
        InputAction::CloseOverlay => {
            model.overlay = None;
            KioskCmd::None
        }
        InputAction::OpenHelp => {
            model.overlay = Some(Overlay::Help);
            KioskCmd::None
        }
        InputAction::ToggleTheme => {
            model.theme = model.theme.toggle();
            batch(vec![
                KioskCmd::SaveTheme,
                KioskCmd::Log(SessionEvent::ThemeChanged {
                    theme: model.theme.label().to_owned(),
                }),
            ])
        }
        InputAction::ToggleNavMenu => {
            model.nav_menu_open = !model.nav_menu_open;
            model.nav_focus = 0;
            KioskCmd::None
        }
        InputAction::NavFocusNext => {
            if model.nav_focus + 1 < Section::ALL.len() {
                model.nav_focus += 1;
            }
            KioskCmd::None
        }
        InputAction::NavFocusPrev => {
            model.nav_focus = model.nav_focus.saturating_sub(1);
            KioskCmd::None
        }
        InputAction::NavActivate => {
            let section = Section::ALL[model.nav_focus.min(Section::ALL.len() - 1)];
            apply_input_action(model, InputAction::Navigate(section), now)
        }
        InputAction::Navigate(section) => {
            let target = model
                .layout
                .anchors
                .jump_target(section, model.config.scroll.header_offset_px);
            model.scroll_to(f64::from(target));
            model.active_section = section;
            // Selecting a link closes the compact menu.
            model.nav_menu_open = false;
            KioskCmd::Log(SessionEvent::SectionViewed {
                section: section.id().to_owned(),
            })
        }
        InputAction::CarouselPrev => {
            if model.carousel.is_empty() {
                return KioskCmd::None;
            }
            model.carousel.prev(now);
            KioskCmd::Log(SessionEvent::CarouselPage {
                page: model.carousel.current_page(),
            })
        }
        InputAction::CarouselNext => {
            if model.carousel.is_empty() {
                return KioskCmd::None;
            }
            model.carousel.next(now);
            KioskCmd::Log(SessionEvent::CarouselPage {
                page: model.carousel.current_page(),
            })
        }
        InputAction::BackToTop => {
            model.scroll_to(0.0);
            KioskCmd::None
        }
        InputAction::ScrollLines(lines) => {
            model.scroll_by(f64::from(lines) * f64::from(layout::CELL_H_PX));
            KioskCmd::None
        }
        InputAction::ScrollPages(pages) => {
            let page = f64::from(layout::viewport_height_px(model.terminal_size.1));
            model.scroll_by(f64::from(pages) * page);
            KioskCmd::None
        }
        InputAction::CycleFilter => {
            let index = model.next_filter_index();
            apply_filter(model, index, now)
        }
        InputAction::OpenReservation => {
            model.overlay = Some(Overlay::Reservation);
            KioskCmd::Log(SessionEvent::ReservationOpened)
        }
        InputAction::OpenChat => match chat_link(&model.config.contact.whatsapp_phone) {
            Ok(url) => batch(vec![
                KioskCmd::OpenUrl(url.to_string()),
                KioskCmd::Log(SessionEvent::ChatOpened {
                    link: url.to_string(),
                }),
            ]),
            Err(err) => degrade(model, &err.to_string(), err.code(), now),
        },
        InputAction::FieldNext => {
            model.reservation.focus_next();
            KioskCmd::None
        }
        InputAction::FieldPrev => {
            model.reservation.focus_prev();
            KioskCmd::None
        }
        InputAction::TypeChar(c) => {
            model.reservation.type_char(c);
            KioskCmd::None
        }
        InputAction::EraseChar => {
            model.reservation.backspace();
            KioskCmd::None
        }
        InputAction::SubmitReservation => submit_reservation(model, now),
    }
}

fn apply_filter(model: &mut KioskModel, index: usize, now: Instant) -> KioskCmd {
    let visible = model.set_filter(index, now);
    model.reveal_pass(now);
    KioskCmd::Log(SessionEvent::FilterChanged {
        category: model.filter.clone(),
        visible,
    })
}

fn submit_reservation(model: &mut KioskModel, now: Instant) -> KioskCmd {
    if let Err(err) = model.reservation.validate(&model.validator) {
        model.push_notification(NotificationLevel::Warning, err.to_string(), now);
        return KioskCmd::None;
    }

    match reservation_link(
        &model.config.contact.whatsapp_phone,
        &model.config.contact.restaurant_name,
        &model.reservation,
    ) {
        Ok(url) => {
            // Hand-off complete: close the modal and reset the fields.
            model.overlay = None;
            model.reservation.reset();
            model.push_notification(
                NotificationLevel::Success,
                "Reservasi dikirim ke WhatsApp".to_owned(),
                now,
            );
            batch(vec![
                KioskCmd::OpenUrl(url.to_string()),
                KioskCmd::Log(SessionEvent::ReservationSubmitted {
                    link: url.to_string(),
                }),
            ])
        }
        Err(err) => degrade(model, &err.to_string(), err.code(), now),
    }
}

/// Feature-inactive degradation: a toast plus a logged error, never a crash.
fn degrade(model: &mut KioskModel, message: &str, code: &str, now: Instant) -> KioskCmd {
    model.push_notification(NotificationLevel::Warning, message.to_owned(), now);
    KioskCmd::Log(SessionEvent::Error {
        code: code.to_owned(),
        message: message.to_owned(),
    })
}

// ──────────────────── mouse ────────────────────

fn handle_mouse(model: &mut KioskModel, mouse: MouseInput, now: Instant) -> KioskCmd {
    match mouse {
        MouseInput::Moved { col, row } => {
            let map = layout::hit_map(&model.layout, &model.chrome_state(), model.scroll_px_rounded());
            let inside = map
                .iter()
                .find(|(_, t)| matches!(t, HitTarget::CarouselRegion))
                .is_some_and(|(rect, _)| rect.contains(col, row));
            if inside && !model.pointer_over_carousel {
                model.pointer_over_carousel = true;
                model.carousel.hover_start();
            } else if !inside && model.pointer_over_carousel {
                model.pointer_over_carousel = false;
                model.carousel.hover_end(now);
            }
            KioskCmd::None
        }
        MouseInput::Down { col, row } => {
            let map = layout::hit_map(&model.layout, &model.chrome_state(), model.scroll_px_rounded());
            let target = layout::hit_test(&map, col, row);
            handle_press(model, target, now)
        }
        MouseInput::WheelUp => {
            model.scroll_by(-3.0 * f64::from(layout::CELL_H_PX));
            KioskCmd::None
        }
        MouseInput::WheelDown => {
            model.scroll_by(3.0 * f64::from(layout::CELL_H_PX));
            KioskCmd::None
        }
    }
}

fn handle_press(model: &mut KioskModel, target: Option<HitTarget>, now: Instant) -> KioskCmd {
    let Some(target) = target else {
        // A press outside everything closes the compact menu.
        model.nav_menu_open = false;
        return KioskCmd::None;
    };

    model.press_flash(target, now);
    match target {
        HitTarget::ThemeToggle => apply_input_action(model, InputAction::ToggleTheme, now),
        HitTarget::MenuToggle => apply_input_action(model, InputAction::ToggleNavMenu, now),
        HitTarget::NavLink(section) => {
            apply_input_action(model, InputAction::Navigate(section), now)
        }
        HitTarget::FilterButton(index) => apply_filter(model, index, now),
        HitTarget::CarouselPrev => apply_input_action(model, InputAction::CarouselPrev, now),
        HitTarget::CarouselNext => apply_input_action(model, InputAction::CarouselNext, now),
        HitTarget::CarouselDot(index) => {
            if model.carousel.is_empty() {
                return KioskCmd::None;
            }
            model.carousel.go_to(index, now);
            KioskCmd::Log(SessionEvent::CarouselPage {
                page: model.carousel.current_page(),
            })
        }
        HitTarget::CarouselRegion => {
            // Pressing the card area itself pauses nothing extra; the hover
            // transition already owns the timer.
            if model.nav_menu_open {
                model.nav_menu_open = false;
            }
            KioskCmd::None
        }
        HitTarget::BackToTop => apply_input_action(model, InputAction::BackToTop, now),
        HitTarget::WhatsAppFloat => apply_input_action(model, InputAction::OpenChat, now),
        HitTarget::ReservationOpen => {
            apply_input_action(model, InputAction::OpenReservation, now)
        }
        HitTarget::ModalClose | HitTarget::ModalBackdrop => {
            model.overlay = None;
            KioskCmd::None
        }
        HitTarget::ModalBody => KioskCmd::None,
        HitTarget::ModalSubmit => submit_reservation(model, now),
        HitTarget::ModalField(field) => {
            model.reservation.focused = field;
            KioskCmd::None
        }
    }
}

fn batch(mut cmds: Vec<KioskCmd>) -> KioskCmd {
    match cmds.len() {
        0 => KioskCmd::None,
        1 => cmds.remove(0),
        _ => KioskCmd::Batch(cmds),
    }
}

// ──────────────────── tests ────────────────────
