//! Frame renderer: raw crossterm painting of the kiosk model.
//!
//! Uses `crossterm` for terminal manipulation (alternate screen, cursor
//! positioning, color output). No heavy TUI framework needed — the page is
//! painted block by block into the scroll window each frame.

#![allow(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::booking::form::FieldId;
use crate::ui::layout::{
    self, BlockId, CELL_H_PX, CELL_W_PX, HEADER_ROWS, HitTarget, STATUS_ROWS,
};
use crate::ui::model::{KioskModel, NotificationLevel, Overlay, Section};
use crate::ui::theme::{SemanticToken, Theme};
use crate::ui::widgets::{center, dot_row, leader_line, truncate, wrap};

// ──────────────────── palette ────────────────────

/// Map a semantic token to a concrete color under the active theme.
#[must_use]
pub const fn token_color(theme: Theme, token: SemanticToken) -> Color {
    match theme {
        Theme::Light => match token {
            SemanticToken::Accent => Color::Blue,
            SemanticToken::Body => Color::Black,
            SemanticToken::Muted => Color::DarkGrey,
            SemanticToken::Success => Color::DarkGreen,
            SemanticToken::Warning => Color::DarkYellow,
            SemanticToken::Highlight => Color::DarkBlue,
        },
        Theme::Dark => match token {
            SemanticToken::Accent => Color::Cyan,
            SemanticToken::Body => Color::White,
            SemanticToken::Muted => Color::Grey,
            SemanticToken::Success => Color::Green,
            SemanticToken::Warning => Color::Yellow,
            SemanticToken::Highlight => Color::Blue,
        },
    }
}

fn set_token(
    out: &mut impl Write,
    model: &KioskModel,
    token: SemanticToken,
) -> io::Result<()> {
    if model.accessibility.no_color() {
        return Ok(());
    }
    queue!(out, SetForegroundColor(token_color(model.theme, token)))
}

// ──────────────────── frame ────────────────────

/// Paint one full frame.
pub fn render_frame(out: &mut impl Write, model: &KioskModel) -> io::Result<()> {
    let (cols, rows) = model.terminal_size;
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    if model.splash_until.is_some() {
        render_splash(out, model, cols, rows)?;
        out.flush()?;
        return Ok(());
    }

    if layout::is_terminal_too_small(cols, rows) {
        queue!(out, MoveTo(0, rows / 2))?;
        write!(
            out,
            "{}",
            center("terminal too small — enlarge the window", cols as usize)
        )?;
        out.flush()?;
        return Ok(());
    }

    render_content(out, model, cols, rows)?;
    render_header(out, model, cols)?;
    render_floats(out, model, cols, rows)?;
    render_status_bar(out, model, cols, rows)?;
    render_notifications(out, model, cols, rows)?;

    match model.overlay {
        Some(Overlay::Reservation) => render_modal(out, model, cols, rows)?,
        Some(Overlay::Help) => render_help(out, model, cols, rows)?,
        None => {}
    }

    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}

// ──────────────────── splash ────────────────────

fn render_splash(
    out: &mut impl Write,
    model: &KioskModel,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let mid = rows / 2;
    set_token(out, model, SemanticToken::Accent)?;
    queue!(out, MoveTo(0, mid.saturating_sub(1)), SetAttribute(Attribute::Bold))?;
    write!(
        out,
        "{}",
        center(&model.config.contact.restaurant_name, cols as usize)
    )?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    set_token(out, model, SemanticToken::Muted)?;
    // Walking dots while the splash holds.
    let dots = ".".repeat((model.tick as usize % 3) + 1);
    queue!(out, MoveTo(0, mid + 1))?;
    write!(out, "{}", center(&dots, cols as usize))?;
    Ok(())
}

// ──────────────────── header ────────────────────

fn render_header(out: &mut impl Write, model: &KioskModel, cols: u16) -> io::Result<()> {
    let width = cols as usize;

    // Scrolled treatment: a solid rule under the bar.
    let rule = if model.navbar_scrolled() { "━" } else { "─" };
    set_token(out, model, SemanticToken::Accent)?;
    queue!(out, MoveTo(0, 0))?;
    write!(out, "{}", " ".repeat(width))?;

    queue!(out, MoveTo(1, 1), SetAttribute(Attribute::Bold))?;
    write!(
        out,
        "{}",
        truncate(&model.config.contact.restaurant_name, width.saturating_sub(14))
    )?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    if model.compact() {
        // Hamburger + theme toggle.
        set_token(out, model, SemanticToken::Body)?;
        queue!(out, MoveTo(cols.saturating_sub(9), 1))?;
        let pressed = model.is_pressed(HitTarget::MenuToggle);
        if pressed || model.nav_menu_open {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        write!(out, "[≡]")?;
        queue!(out, SetAttribute(Attribute::Reset))?;
    } else {
        let count = Section::ALL.len() as u16;
        let start = cols.saturating_sub(count * 14 + 6);
        for (i, section) in Section::ALL.iter().enumerate() {
            queue!(out, MoveTo(start + i as u16 * 14, 1))?;
            if *section == model.active_section {
                set_token(out, model, SemanticToken::Accent)?;
                queue!(out, SetAttribute(Attribute::Bold), SetAttribute(Attribute::Underlined))?;
            } else {
                set_token(out, model, SemanticToken::Muted)?;
            }
            write!(out, "{}", truncate(section.title(), 13))?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
    }

    set_token(out, model, SemanticToken::Body)?;
    queue!(out, MoveTo(cols.saturating_sub(4), 1))?;
    if model.is_pressed(HitTarget::ThemeToggle) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    write!(out, "[{}]", if model.theme == Theme::Dark { "☾" } else { "☀" })?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    set_token(out, model, SemanticToken::Accent)?;
    queue!(out, MoveTo(0, 2))?;
    write!(out, "{}", rule.repeat(width))?;

    // Compact nav drawer under the bar.
    if model.compact() && model.nav_menu_open {
        for (i, section) in Section::ALL.iter().enumerate() {
            queue!(out, MoveTo(cols.saturating_sub(20), HEADER_ROWS + i as u16))?;
            if i == model.nav_focus {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            set_token(out, model, SemanticToken::Body)?;
            write!(out, " {:<16} ", section.title())?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
    }
    Ok(())
}

// ──────────────────── content window ────────────────────

fn render_content(out: &mut impl Write, model: &KioskModel, cols: u16, rows: u16) -> io::Result<()> {
    let mut menu_slot = 0usize;

    for block in &model.layout.blocks {
        if !model.is_block_visible(block.id) {
            if matches!(block.id, BlockId::MenuCard(_)) {
                menu_slot += 1;
            }
            continue;
        }
        match block.id {
            BlockId::HeroTitle | BlockId::HeroTagline | BlockId::HeroCta => {
                render_hero_block(out, model, block.id, block.y_px, cols, rows)?;
            }
            BlockId::HeroShape(i) => render_shape(out, model, i, block.y_px, cols, rows)?,
            BlockId::MenuHeader => {
                render_section_header(out, model, "Menu", block.y_px, cols, rows)?;
            }
            BlockId::FilterBar => render_filter_bar(out, model, block.y_px, rows)?,
            BlockId::MenuCard(index) => {
                render_menu_card(out, model, index, menu_slot, block.y_px, cols, rows)?;
                menu_slot += 1;
            }
            BlockId::TestimonialsHeader => {
                render_section_header(out, model, "Kata Mereka", block.y_px, cols, rows)?;
            }
            BlockId::Carousel => render_carousel(out, model, block.y_px, cols, rows)?,
            BlockId::CarouselDots => render_dots(out, model, block.y_px, cols, rows)?,
            BlockId::ContactHeader => {
                render_section_header(out, model, "Kontak", block.y_px, cols, rows)?;
            }
            BlockId::ContactCard => render_contact(out, model, block.y_px, cols, rows)?,
        }
    }
    Ok(())
}

fn content_row(model: &KioskModel, y_px: u32, rows: u16) -> Option<u16> {
    layout::content_row(y_px, model.scroll_px_rounded(), rows)
}

fn render_hero_block(
    out: &mut impl Write,
    model: &KioskModel,
    id: BlockId,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    // Parallax: hero content drifts down at half scroll speed and fades out.
    let shifted = y_px + model.hero_parallax_px() as u32;
    let Some(row) = content_row(model, shifted, rows) else {
        return Ok(());
    };
    let fade = model.hero_fade();
    let token = if fade > 0.85 {
        return Ok(());
    } else if fade > 0.45 {
        SemanticToken::Muted
    } else {
        SemanticToken::Accent
    };
    let width = cols as usize;

    match id {
        BlockId::HeroTitle => {
            set_token(out, model, token)?;
            queue!(out, MoveTo(0, row), SetAttribute(Attribute::Bold))?;
            write!(
                out,
                "{}",
                center(&format!("🍟 {} 🍟", model.config.contact.restaurant_name), width)
            )?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        BlockId::HeroTagline => {
            set_token(out, model, if fade > 0.45 { token } else { SemanticToken::Body })?;
            queue!(out, MoveTo(0, row))?;
            write!(out, "{}", center(&model.content.tagline, width))?;
        }
        BlockId::HeroCta => {
            set_token(out, model, token)?;
            queue!(out, MoveTo((cols / 2).saturating_sub(10), row))?;
            if model.is_pressed(HitTarget::ReservationOpen) {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            write!(out, "[ Reservasi Meja (r) ]")?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        _ => {}
    }
    Ok(())
}

fn render_shape(
    out: &mut impl Write,
    model: &KioskModel,
    index: u8,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    // Shapes only decorate the hero; they drift diagonally with scroll.
    if model.scroll_px_rounded() >= model.layout.anchors.menu {
        return Ok(());
    }
    let drift = model.shape_drift_px(index) as u32;
    let Some(row) = content_row(model, y_px + drift, rows) else {
        return Ok(());
    };
    let x = (10 + u32::from(index) * 28 + drift / CELL_W_PX) % u32::from(cols.max(1));
    set_token(out, model, SemanticToken::Muted)?;
    queue!(out, MoveTo(x as u16, row))?;
    write!(out, "{}", ["✦", "◆", "●"][usize::from(index) % 3])?;
    Ok(())
}

fn render_section_header(
    out: &mut impl Write,
    model: &KioskModel,
    title: &str,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let Some(row) = content_row(model, y_px, rows) else {
        return Ok(());
    };
    let width = cols as usize;
    set_token(out, model, SemanticToken::Accent)?;
    queue!(out, MoveTo(0, row), SetAttribute(Attribute::Bold))?;
    write!(out, "{}", center(&format!("── {title} ──"), width))?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn render_filter_bar(
    out: &mut impl Write,
    model: &KioskModel,
    y_px: u32,
    rows: u16,
) -> io::Result<()> {
    let Some(row) = content_row(model, y_px, rows) else {
        return Ok(());
    };
    for (i, option) in model.filter_options.iter().enumerate() {
        queue!(out, MoveTo(2 + i as u16 * 12, row))?;
        let active = *option == model.filter;
        if active || model.is_pressed(HitTarget::FilterButton(i)) {
            set_token(out, model, SemanticToken::Accent)?;
            queue!(out, SetAttribute(Attribute::Reverse))?;
        } else {
            set_token(out, model, SemanticToken::Muted)?;
        }
        write!(out, "[{}]", truncate(option, 9))?;
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn render_menu_card(
    out: &mut impl Write,
    model: &KioskModel,
    index: usize,
    slot: usize,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let Some(item) = model.content.menu.get(index) else {
        return Ok(());
    };
    let Some(row) = content_row(model, y_px, rows) else {
        return Ok(());
    };
    let columns = model.layout.menu_columns.max(1);
    let card_w = (cols as usize).saturating_sub(4) / columns;
    if card_w < 12 {
        return Ok(());
    }
    let x = 2 + (slot % columns) * card_w;

    set_token(out, model, SemanticToken::Body)?;
    queue!(out, MoveTo(x as u16, row), SetAttribute(Attribute::Bold))?;
    write!(
        out,
        "{}",
        leader_line(&item.name, &item.price_label(), card_w.saturating_sub(2))
    )?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    set_token(out, model, SemanticToken::Muted)?;
    if row + 1 < rows.saturating_sub(STATUS_ROWS) {
        queue!(out, MoveTo(x as u16, row + 1))?;
        write!(out, "{}", truncate(&item.description, card_w.saturating_sub(2)))?;
        if row + 2 < rows.saturating_sub(STATUS_ROWS) {
            queue!(out, MoveTo(x as u16, row + 2))?;
            write!(out, "{}", truncate(&item.categories.join(" · "), card_w.saturating_sub(2)))?;
        }
    }
    Ok(())
}

fn render_carousel(
    out: &mut impl Write,
    model: &KioskModel,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let Some(row) = content_row(model, y_px, rows) else {
        return Ok(());
    };
    if model.carousel.is_empty() {
        return Ok(());
    }
    // The carousel block is 9 rows tall at the fixed cell height.
    let mid = row + 4;

    // Prev/next arrows.
    set_token(out, model, SemanticToken::Accent)?;
    if mid < rows.saturating_sub(STATUS_ROWS) {
        queue!(out, MoveTo(1, mid))?;
        if model.is_pressed(HitTarget::CarouselPrev) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        write!(out, "❮")?;
        queue!(out, SetAttribute(Attribute::Reset))?;
        set_token(out, model, SemanticToken::Accent)?;
        queue!(out, MoveTo(cols.saturating_sub(3), mid))?;
        if model.is_pressed(HitTarget::CarouselNext) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        write!(out, "❯")?;
        queue!(out, SetAttribute(Attribute::Reset))?;
    }

    // Visible cards, side by side.
    let range = model.carousel.visible_range();
    let capacity = model.carousel.capacity().max(1);
    let card_w = (cols as usize).saturating_sub(8) / capacity;
    for (pos, item_index) in range.clone().enumerate() {
        let Some(testimonial) = model.content.testimonials.get(item_index) else {
            continue;
        };
        let x = (4 + pos * card_w) as u16;
        let inner = card_w.saturating_sub(3);
        let quote_lines = wrap(&testimonial.quote, inner, 3);
        for (li, line) in quote_lines.iter().enumerate() {
            let r = row + 1 + li as u16;
            if r >= rows.saturating_sub(STATUS_ROWS) {
                break;
            }
            set_token(out, model, SemanticToken::Body)?;
            queue!(out, MoveTo(x, r))?;
            write!(out, "“{line}”")?;
        }
        let byline = row + 5;
        if byline < rows.saturating_sub(STATUS_ROWS) {
            set_token(out, model, SemanticToken::Accent)?;
            queue!(out, MoveTo(x, byline))?;
            write!(out, "— {}", truncate(&testimonial.author, inner.saturating_sub(8)))?;
            set_token(out, model, SemanticToken::Warning)?;
            queue!(out, MoveTo(x, byline + 1))?;
            write!(out, "{}", testimonial.stars())?;
        }
    }
    Ok(())
}

fn render_dots(
    out: &mut impl Write,
    model: &KioskModel,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let Some(row) = content_row(model, y_px, rows) else {
        return Ok(());
    };
    let indicators = model.carousel.indicators();
    if indicators.is_empty() {
        return Ok(());
    }
    let active = indicators
        .iter()
        .find(|i| i.active)
        .map_or(0, |i| i.index);
    let line = dot_row(indicators.len(), active);
    let start = (cols / 2).saturating_sub(indicators.len() as u16);
    set_token(out, model, SemanticToken::Accent)?;
    queue!(out, MoveTo(start, row))?;
    write!(out, "{line}")?;
    Ok(())
}

fn render_contact(
    out: &mut impl Write,
    model: &KioskModel,
    y_px: u32,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let width = cols as usize;
    let lines = [
        model.config.contact.address.clone(),
        format!("WhatsApp: +{}", model.config.contact.whatsapp_phone),
        "Buka setiap hari 10.00 – 22.00".to_owned(),
    ];
    for (i, line) in lines.iter().enumerate() {
        if let Some(row) = content_row(model, y_px + i as u32 * CELL_H_PX, rows) {
            set_token(out, model, SemanticToken::Body)?;
            queue!(out, MoveTo(4, row))?;
            write!(out, "{}", truncate(line, width.saturating_sub(8)))?;
        }
    }
    if let Some(row) = content_row(model, y_px + CELL_H_PX * 6, rows) {
        set_token(out, model, SemanticToken::Accent)?;
        queue!(out, MoveTo(4, row))?;
        if model.is_pressed(HitTarget::ReservationOpen) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        write!(out, "[ Reservasi Meja (r) ]")?;
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

// ──────────────────── floats & status ────────────────────

fn render_floats(out: &mut impl Write, model: &KioskModel, cols: u16, rows: u16) -> io::Result<()> {
    if model.back_to_top_visible() {
        set_token(out, model, SemanticToken::Muted)?;
        queue!(out, MoveTo(cols.saturating_sub(6), rows.saturating_sub(4)))?;
        if model.is_pressed(HitTarget::BackToTop) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        write!(out, "[↑g]")?;
        queue!(out, SetAttribute(Attribute::Reset))?;
    }

    set_token(out, model, SemanticToken::Success)?;
    queue!(out, MoveTo(cols.saturating_sub(6), rows.saturating_sub(3)))?;
    let pulsing = model.float_pulse_until.is_some();
    if pulsing || model.is_pressed(HitTarget::WhatsAppFloat) {
        queue!(out, SetAttribute(Attribute::Bold), SetAttribute(Attribute::Reverse))?;
    }
    write!(out, "[✆w]")?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn render_status_bar(
    out: &mut impl Write,
    model: &KioskModel,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let width = cols as usize;
    set_token(out, model, SemanticToken::Muted)?;
    queue!(out, MoveTo(0, rows.saturating_sub(1)))?;
    let hints = " 1-4 bagian · ←/→ testimoni · f filter · r reservasi · t tema · ? bantuan · q keluar";
    write!(out, "{}", truncate(hints, width))?;
    Ok(())
}

fn render_notifications(
    out: &mut impl Write,
    model: &KioskModel,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let base = rows.saturating_sub(2);
    for (i, notification) in model.notifications.iter().rev().enumerate() {
        let Some(row) = base.checked_sub(i as u16) else {
            break;
        };
        let token = match notification.level {
            NotificationLevel::Info => SemanticToken::Body,
            NotificationLevel::Success => SemanticToken::Success,
            NotificationLevel::Warning => SemanticToken::Warning,
        };
        set_token(out, model, token)?;
        let text = truncate(&notification.message, (cols as usize).saturating_sub(10));
        queue!(out, MoveTo(1, row))?;
        write!(out, "▌{text}")?;
    }
    Ok(())
}

// ──────────────────── overlays ────────────────────

fn render_modal(out: &mut impl Write, model: &KioskModel, cols: u16, rows: u16) -> io::Result<()> {
    let modal = layout::modal_rect(cols, rows);
    draw_box(out, model, modal, " Reservasi ")?;

    queue!(out, MoveTo(modal.x + modal.w.saturating_sub(4), modal.y))?;
    set_token(out, model, SemanticToken::Muted)?;
    write!(out, "[x]")?;

    for field in [FieldId::Name, FieldId::Date, FieldId::Time, FieldId::Note] {
        let row = layout::modal_field_row(modal, field);
        let focused = model.reservation.focused == field;
        queue!(out, MoveTo(modal.x + 2, row))?;
        if focused {
            set_token(out, model, SemanticToken::Accent)?;
            queue!(out, SetAttribute(Attribute::Bold))?;
        } else {
            set_token(out, model, SemanticToken::Muted)?;
        }
        let value = model.reservation.value(field);
        let shown = if value.is_empty() {
            format!("<{}>", field.placeholder())
        } else {
            value.to_owned()
        };
        let inner = (modal.w as usize).saturating_sub(4);
        let label = format!("{}:", field.label());
        let marker = if focused { "▸" } else { " " };
        write!(
            out,
            "{}",
            truncate(&format!("{marker} {label:<12} {shown}"), inner)
        )?;
        queue!(out, SetAttribute(Attribute::Reset))?;
    }

    let submit_row = modal.y + modal.h.saturating_sub(3);
    set_token(out, model, SemanticToken::Success)?;
    queue!(out, MoveTo(modal.x + 2, submit_row))?;
    if model.is_pressed(HitTarget::ModalSubmit) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    write!(out, "[ Kirim ke WA ]")?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    set_token(out, model, SemanticToken::Muted)?;
    queue!(out, MoveTo(modal.x + 18, submit_row))?;
    write!(
        out,
        "{}",
        truncate("Enter kirim · Esc tutup", (modal.w as usize).saturating_sub(20))
    )?;
    Ok(())
}

fn render_help(out: &mut impl Write, model: &KioskModel, cols: u16, rows: u16) -> io::Result<()> {
    let modal = layout::modal_rect(cols, rows);
    draw_box(out, model, modal, " Bantuan ")?;
    let bindings = [
        ("1-4", "lompat ke bagian"),
        ("←/→", "testimoni sebelumnya/berikutnya"),
        ("j/k", "gulir"),
        ("g", "kembali ke atas"),
        ("f", "ganti filter menu"),
        ("r", "buka form reservasi"),
        ("w", "chat WhatsApp"),
        ("t", "ganti tema"),
        ("m", "menu navigasi ringkas"),
        ("q", "keluar"),
    ];
    for (i, (keys, description)) in bindings.iter().enumerate() {
        let row = modal.y + 2 + i as u16;
        if row >= modal.y + modal.h.saturating_sub(1) {
            break;
        }
        queue!(out, MoveTo(modal.x + 2, row))?;
        set_token(out, model, SemanticToken::Accent)?;
        write!(out, "{keys:>4}")?;
        set_token(out, model, SemanticToken::Body)?;
        write!(out, "  {}", truncate(description, (modal.w as usize).saturating_sub(10)))?;
    }
    Ok(())
}

fn draw_box(
    out: &mut impl Write,
    model: &KioskModel,
    rect: layout::ScreenRect,
    title: &str,
) -> io::Result<()> {
    let inner = (rect.w as usize).saturating_sub(2);
    set_token(out, model, SemanticToken::Accent)?;
    queue!(out, MoveTo(rect.x, rect.y))?;
    write!(out, "┌{:─<inner$}┐", title, inner = inner)?;
    for r in 1..rect.h.saturating_sub(1) {
        queue!(out, MoveTo(rect.x, rect.y + r))?;
        write!(out, "│{:inner$}│", "", inner = inner)?;
    }
    queue!(out, MoveTo(rect.x, rect.y + rect.h.saturating_sub(1)))?;
    write!(out, "└{:─<inner$}┘", "", inner = inner)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use crate::core::config::Config;
    use crate::ui::preferences::PreferenceSource;
    use std::time::Instant;

    fn test_model() -> KioskModel {
        KioskModel::new(
            Config::default(),
            SiteContent::builtin(),
            Theme::Dark,
            PreferenceSource::Defaults,
            (120, 36),
            Instant::now(),
        )
    }

    #[test]
    fn frame_renders_without_panicking_into_a_buffer() {
        let mut model = test_model();
        model.splash_until = None;
        let mut buffer: Vec<u8> = Vec::new();
        render_frame(&mut buffer, &model).unwrap();
        let painted = String::from_utf8_lossy(&buffer);
        assert!(painted.contains("Warung Kumpul 88"));
    }

    #[test]
    fn splash_frame_shows_the_brand() {
        let model = test_model();
        assert!(model.splash_until.is_some());
        let mut buffer: Vec<u8> = Vec::new();
        render_frame(&mut buffer, &model).unwrap();
        let painted = String::from_utf8_lossy(&buffer);
        assert!(painted.contains("Warung Kumpul 88"));
    }

    #[test]
    fn modal_frame_shows_fields() {
        let mut model = test_model();
        model.splash_until = None;
        model.overlay = Some(Overlay::Reservation);
        let mut buffer: Vec<u8> = Vec::new();
        render_frame(&mut buffer, &model).unwrap();
        let painted = String::from_utf8_lossy(&buffer);
        for label in ["Nama", "Tanggal", "Jam", "Keterangan", "Kirim ke WA"] {
            assert!(painted.contains(label), "missing {label}");
        }
    }

    #[test]
    fn tiny_terminal_shows_notice() {
        let mut model = test_model();
        model.splash_until = None;
        model.terminal_size = (20, 8);
        let mut buffer: Vec<u8> = Vec::new();
        render_frame(&mut buffer, &model).unwrap();
        assert!(String::from_utf8_lossy(&buffer).contains("terminal too small"));
    }

    #[test]
    fn light_and_dark_palettes_differ() {
        assert_ne!(
            token_color(Theme::Light, SemanticToken::Accent),
            token_color(Theme::Dark, SemanticToken::Accent)
        );
        assert_ne!(
            token_color(Theme::Light, SemanticToken::Body),
            token_color(Theme::Dark, SemanticToken::Body)
        );
    }
}
