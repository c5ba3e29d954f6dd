//! Virtual-page geometry and hit testing.
//!
//! The storefront is laid out as one tall virtual page measured in virtual
//! pixels; the terminal is a window onto it. A fixed cell-size constant maps
//! terminal cells to virtual pixels so the breakpoint values from
//! [`Breakpoints`] drive both layout and carousel capacity — a ~96-column
//! terminal behaves like the 768 px breakpoint.
//!
//! Both the update function (mouse resolution) and the renderer consume the
//! same [`hit_map`], so what you click is what was drawn.

#![allow(missing_docs)]

use crate::booking::form::FieldId;
use crate::content::SiteContent;
use crate::content::menu::visible_indices;
use crate::core::config::Breakpoints;
use crate::ui::model::Section;

// ──────────────────── cell geometry ────────────────────

/// Virtual pixels per terminal column.
pub const CELL_W_PX: u32 = 8;
/// Virtual pixels per terminal row.
pub const CELL_H_PX: u32 = 16;

/// Header rows pinned to the top of the screen (sticky navbar).
pub const HEADER_ROWS: u16 = 3;
/// Status bar rows pinned to the bottom.
pub const STATUS_ROWS: u16 = 1;

/// Minimum terminal size below which the kiosk shows a "too small" notice.
pub const MIN_USABLE_COLS: u16 = 40;
pub const MIN_USABLE_ROWS: u16 = 12;

/// Virtual viewport width for a terminal width in columns.
#[must_use]
pub const fn viewport_width_px(cols: u16) -> u32 {
    cols as u32 * CELL_W_PX
}

/// Virtual height of the scrollable window (terminal minus chrome).
#[must_use]
pub const fn viewport_height_px(rows: u16) -> u32 {
    rows.saturating_sub(HEADER_ROWS + STATUS_ROWS) as u32 * CELL_H_PX
}

/// Whether the terminal is too small to render usefully.
#[must_use]
pub const fn is_terminal_too_small(cols: u16, rows: u16) -> bool {
    cols < MIN_USABLE_COLS || rows < MIN_USABLE_ROWS
}

// ──────────────────── block heights ────────────────────

const HERO_HEIGHT: u32 = 480;
const SECTION_HEADER_H: u32 = 48;
const FILTER_BAR_H: u32 = 48;
const MENU_CARD_H: u32 = 96;
const MENU_ROW_GAP: u32 = 16;
const CAROUSEL_H: u32 = 144;
const DOTS_H: u32 = 32;
const CONTACT_CARD_H: u32 = 160;
const SECTION_PAD: u32 = 32;
const PAGE_FOOT_PAD: u32 = 64;

// ──────────────────── virtual blocks ────────────────────

/// Identity of a placed block on the virtual page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockId {
    HeroTitle,
    HeroTagline,
    HeroCta,
    /// Decorative drifting shape, by index.
    HeroShape(u8),
    MenuHeader,
    FilterBar,
    /// Menu card by original menu index (filtered-out cards are not placed).
    MenuCard(usize),
    TestimonialsHeader,
    Carousel,
    CarouselDots,
    ContactHeader,
    ContactCard,
}

/// A block placed on the virtual page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    pub id: BlockId,
    /// Top edge in virtual pixels.
    pub y_px: u32,
    pub height_px: u32,
    /// Whether the block participates in scroll-reveal.
    pub reveal: bool,
}

/// Section anchor offsets on the virtual page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionAnchors {
    pub home: u32,
    pub menu: u32,
    pub testimonials: u32,
    pub contact: u32,
}

impl SectionAnchors {
    /// Top offset of a section.
    #[must_use]
    pub const fn anchor(&self, section: Section) -> u32 {
        match section {
            Section::Home => self.home,
            Section::Menu => self.menu,
            Section::Testimonials => self.testimonials,
            Section::Contact => self.contact,
        }
    }

    /// Scroll target for a nav jump: the anchor minus the sticky header.
    #[must_use]
    pub const fn jump_target(&self, section: Section, header_offset_px: u32) -> u32 {
        self.anchor(section).saturating_sub(header_offset_px)
    }

    /// The section whose body contains `scroll_px + margin` — drives the
    /// active nav link while scrolling.
    #[must_use]
    pub const fn section_at(&self, scroll_px: u32, margin_px: u32) -> Section {
        let probe = scroll_px + margin_px;
        if probe >= self.contact {
            Section::Contact
        } else if probe >= self.testimonials {
            Section::Testimonials
        } else if probe >= self.menu {
            Section::Menu
        } else {
            Section::Home
        }
    }
}

/// The fully placed virtual page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub blocks: Vec<PlacedBlock>,
    pub anchors: SectionAnchors,
    pub total_height_px: u32,
    /// Menu grid columns at the current width (same capacity rule as the
    /// carousel).
    pub menu_columns: usize,
}

impl PageLayout {
    /// Find a placed block by id.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Largest scroll offset that still fills the viewport.
    #[must_use]
    pub fn max_scroll_px(&self, rows: u16) -> u32 {
        self.total_height_px
            .saturating_sub(viewport_height_px(rows))
    }
}

/// Place every visible block on the virtual page.
#[must_use]
pub fn build(
    content: &SiteContent,
    filter: &str,
    width_px: u32,
    breakpoints: Breakpoints,
) -> PageLayout {
    let menu_columns = breakpoints.capacity_for(width_px);
    let mut blocks = Vec::new();

    // Hero.
    blocks.push(PlacedBlock {
        id: BlockId::HeroTitle,
        y_px: 96,
        height_px: 64,
        reveal: false,
    });
    blocks.push(PlacedBlock {
        id: BlockId::HeroTagline,
        y_px: 176,
        height_px: 32,
        reveal: false,
    });
    blocks.push(PlacedBlock {
        id: BlockId::HeroCta,
        y_px: 240,
        height_px: 48,
        reveal: false,
    });
    for i in 0..3u8 {
        blocks.push(PlacedBlock {
            id: BlockId::HeroShape(i),
            y_px: 48 + u32::from(i) * 128,
            height_px: 16,
            reveal: false,
        });
    }

    // Menu.
    let menu_top = HERO_HEIGHT;
    blocks.push(PlacedBlock {
        id: BlockId::MenuHeader,
        y_px: menu_top,
        height_px: SECTION_HEADER_H,
        reveal: true,
    });
    blocks.push(PlacedBlock {
        id: BlockId::FilterBar,
        y_px: menu_top + SECTION_HEADER_H,
        height_px: FILTER_BAR_H,
        reveal: false,
    });

    let grid_top = menu_top + SECTION_HEADER_H + FILTER_BAR_H;
    let visible = visible_indices(&content.menu, filter);
    let mut grid_rows = 0;
    for (slot, menu_index) in visible.iter().enumerate() {
        let row = slot / menu_columns;
        grid_rows = grid_rows.max(row + 1);
        blocks.push(PlacedBlock {
            id: BlockId::MenuCard(*menu_index),
            y_px: grid_top + row as u32 * (MENU_CARD_H + MENU_ROW_GAP),
            height_px: MENU_CARD_H,
            reveal: true,
        });
    }
    let grid_height = grid_rows as u32 * (MENU_CARD_H + MENU_ROW_GAP);

    // Testimonials.
    let testimonials_top = grid_top + grid_height + SECTION_PAD;
    blocks.push(PlacedBlock {
        id: BlockId::TestimonialsHeader,
        y_px: testimonials_top,
        height_px: SECTION_HEADER_H,
        reveal: true,
    });
    blocks.push(PlacedBlock {
        id: BlockId::Carousel,
        y_px: testimonials_top + SECTION_HEADER_H,
        height_px: CAROUSEL_H,
        reveal: true,
    });
    blocks.push(PlacedBlock {
        id: BlockId::CarouselDots,
        y_px: testimonials_top + SECTION_HEADER_H + CAROUSEL_H,
        height_px: DOTS_H,
        reveal: false,
    });

    // Contact.
    let contact_top = testimonials_top + SECTION_HEADER_H + CAROUSEL_H + DOTS_H + SECTION_PAD;
    blocks.push(PlacedBlock {
        id: BlockId::ContactHeader,
        y_px: contact_top,
        height_px: SECTION_HEADER_H,
        reveal: true,
    });
    blocks.push(PlacedBlock {
        id: BlockId::ContactCard,
        y_px: contact_top + SECTION_HEADER_H,
        height_px: CONTACT_CARD_H,
        reveal: true,
    });

    PageLayout {
        blocks,
        anchors: SectionAnchors {
            home: 0,
            menu: menu_top,
            testimonials: testimonials_top,
            contact: contact_top,
        },
        total_height_px: contact_top + SECTION_HEADER_H + CONTACT_CARD_H + PAGE_FOOT_PAD,
        menu_columns,
    }
}

// ──────────────────── screen space ────────────────────

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Whether a cell falls inside the rect.
    #[must_use]
    pub const fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

/// Screen row of a virtual offset, if it lands inside the content window.
#[must_use]
pub fn content_row(y_px: u32, scroll_px: u32, rows: u16) -> Option<u16> {
    let top = i64::from(y_px) - i64::from(scroll_px);
    let row = top.div_euclid(i64::from(CELL_H_PX)) + i64::from(HEADER_ROWS);
    let last = i64::from(rows.saturating_sub(STATUS_ROWS));
    if row < i64::from(HEADER_ROWS) || row >= last {
        None
    } else {
        u16::try_from(row).ok()
    }
}

/// Everything clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    ThemeToggle,
    MenuToggle,
    NavLink(Section),
    /// Index into the filter option list (0 = "all").
    FilterButton(usize),
    CarouselPrev,
    CarouselNext,
    CarouselDot(usize),
    /// The hover region pausing auto-advance.
    CarouselRegion,
    BackToTop,
    WhatsAppFloat,
    ReservationOpen,
    ModalClose,
    ModalSubmit,
    ModalField(FieldId),
    /// The modal frame itself — absorbs presses without closing.
    ModalBody,
    ModalBackdrop,
}

/// Snapshot of the chrome state needed to compute hit regions.
#[derive(Debug, Clone, Copy)]
pub struct ChromeState {
    pub cols: u16,
    pub rows: u16,
    /// Compact ("hamburger") navigation — viewport at or under the narrow
    /// breakpoint.
    pub compact: bool,
    pub nav_menu_open: bool,
    pub modal_open: bool,
    pub back_to_top_visible: bool,
    /// Number of filter options including "all".
    pub filter_options: usize,
    /// Number of carousel page dots.
    pub dot_count: usize,
}

/// Modal frame geometry, shared by hit testing and rendering.
#[must_use]
pub fn modal_rect(cols: u16, rows: u16) -> ScreenRect {
    let w = 46.min(cols.saturating_sub(4));
    let h = 14.min(rows.saturating_sub(4));
    ScreenRect::new(
        (cols.saturating_sub(w)) / 2,
        (rows.saturating_sub(h)) / 2,
        w,
        h,
    )
}

/// Screen row of a modal form field, inside [`modal_rect`].
#[must_use]
pub const fn modal_field_row(modal: ScreenRect, field: FieldId) -> u16 {
    let slot = match field {
        FieldId::Name => 0,
        FieldId::Date => 1,
        FieldId::Time => 2,
        FieldId::Note => 3,
    };
    modal.y + 3 + slot * 2
}

/// The ordered clickable regions for the current frame. First match wins, so
/// modal surfaces come before (and fully mask) the page behind them.
#[must_use]
pub fn hit_map(layout: &PageLayout, chrome: &ChromeState, scroll_px: u32) -> Vec<(ScreenRect, HitTarget)> {
    let mut map = Vec::new();
    let cols = chrome.cols;
    let rows = chrome.rows;

    if chrome.modal_open {
        let modal = modal_rect(cols, rows);
        // Close control in the frame's top-right corner.
        map.push((
            ScreenRect::new(modal.x + modal.w.saturating_sub(4), modal.y, 3, 1),
            HitTarget::ModalClose,
        ));
        for field in [FieldId::Name, FieldId::Date, FieldId::Time, FieldId::Note] {
            map.push((
                ScreenRect::new(modal.x + 2, modal_field_row(modal, field), modal.w - 4, 1),
                HitTarget::ModalField(field),
            ));
        }
        map.push((
            ScreenRect::new(modal.x + 2, modal.y + modal.h.saturating_sub(3), 12, 1),
            HitTarget::ModalSubmit,
        ));
        // The frame absorbs presses; only a true backdrop press closes.
        map.push((modal, HitTarget::ModalBody));
        map.push((ScreenRect::new(0, 0, cols, rows), HitTarget::ModalBackdrop));
        return map;
    }

    // Header chrome: brand left, controls right.
    map.push((
        ScreenRect::new(cols.saturating_sub(4), 1, 3, 1),
        HitTarget::ThemeToggle,
    ));
    if chrome.compact {
        map.push((
            ScreenRect::new(cols.saturating_sub(9), 1, 3, 1),
            HitTarget::MenuToggle,
        ));
        if chrome.nav_menu_open {
            for (i, section) in Section::ALL.iter().enumerate() {
                map.push((
                    ScreenRect::new(
                        cols.saturating_sub(20),
                        HEADER_ROWS + u16::try_from(i).unwrap_or(0),
                        18,
                        1,
                    ),
                    HitTarget::NavLink(*section),
                ));
            }
        }
    } else {
        // Right-aligned inline links, fixed 14-cell slots.
        let count = u16::try_from(Section::ALL.len()).unwrap_or(4);
        let links_w = count * 14;
        let start = cols.saturating_sub(links_w + 6);
        for (i, section) in Section::ALL.iter().enumerate() {
            map.push((
                ScreenRect::new(start + u16::try_from(i).unwrap_or(0) * 14, 1, 13, 1),
                HitTarget::NavLink(*section),
            ));
        }
    }

    // Corner floats.
    if chrome.back_to_top_visible {
        map.push((
            ScreenRect::new(cols.saturating_sub(6), rows.saturating_sub(4), 4, 1),
            HitTarget::BackToTop,
        ));
    }
    map.push((
        ScreenRect::new(cols.saturating_sub(6), rows.saturating_sub(3), 4, 1),
        HitTarget::WhatsAppFloat,
    ));

    // Content blocks currently on screen.
    if let Some(block) = layout.block(BlockId::HeroCta)
        && let Some(row) = content_row(block.y_px, scroll_px, rows)
    {
        map.push((
            ScreenRect::new((cols / 2).saturating_sub(10), row, 20, 2),
            HitTarget::ReservationOpen,
        ));
    }

    if let Some(block) = layout.block(BlockId::FilterBar)
        && let Some(row) = content_row(block.y_px, scroll_px, rows)
    {
        for i in 0..chrome.filter_options {
            map.push((
                ScreenRect::new(2 + u16::try_from(i).unwrap_or(0) * 12, row, 11, 1),
                HitTarget::FilterButton(i),
            ));
        }
    }

    if let Some(block) = layout.block(BlockId::Carousel)
        && let Some(row) = content_row(block.y_px, scroll_px, rows)
    {
        let h = u16::try_from(block.height_px / CELL_H_PX).unwrap_or(9);
        let mid = row + h / 2;
        map.push((ScreenRect::new(1, mid, 3, 1), HitTarget::CarouselPrev));
        map.push((
            ScreenRect::new(cols.saturating_sub(4), mid, 3, 1),
            HitTarget::CarouselNext,
        ));
        // The hover region spans the whole viewport band.
        map.push((
            ScreenRect::new(0, row, cols, h),
            HitTarget::CarouselRegion,
        ));
    }

    if let Some(block) = layout.block(BlockId::CarouselDots)
        && let Some(row) = content_row(block.y_px, scroll_px, rows)
        && chrome.dot_count > 0
    {
        let count = u16::try_from(chrome.dot_count).unwrap_or(1);
        let start = (cols / 2).saturating_sub(count);
        for i in 0..chrome.dot_count {
            map.push((
                ScreenRect::new(start + u16::try_from(i).unwrap_or(0) * 2, row, 1, 1),
                HitTarget::CarouselDot(i),
            ));
        }
    }

    if let Some(block) = layout.block(BlockId::ContactCard)
        && let Some(row) = content_row(block.y_px + CELL_H_PX * 6, scroll_px, rows)
    {
        map.push((
            ScreenRect::new(4, row, 20, 1),
            HitTarget::ReservationOpen,
        ));
    }

    map
}

/// Resolve a mouse press to the topmost hit target.
#[must_use]
pub fn hit_test(
    map: &[(ScreenRect, HitTarget)],
    col: u16,
    row: u16,
) -> Option<HitTarget> {
    map.iter()
        .find(|(rect, _)| rect.contains(col, row))
        .map(|(_, target)| *target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Breakpoints;

    const BP: Breakpoints = Breakpoints {
        narrow_px: 768,
        medium_px: 1024,
    };

    fn layout_at(cols: u16, filter: &str) -> PageLayout {
        build(
            &SiteContent::builtin(),
            filter,
            viewport_width_px(cols),
            BP,
        )
    }

    #[test]
    fn cell_mapping_hits_the_web_breakpoints() {
        // 96 cols ≈ 768 px, 128 cols ≈ 1024 px.
        assert_eq!(viewport_width_px(96), 768);
        assert_eq!(BP.capacity_for(viewport_width_px(96)), 1);
        assert_eq!(BP.capacity_for(viewport_width_px(128)), 2);
        assert_eq!(BP.capacity_for(viewport_width_px(160)), 3);
    }

    #[test]
    fn sections_are_ordered_on_the_page() {
        let layout = layout_at(120, "all");
        let a = layout.anchors;
        assert_eq!(a.home, 0);
        assert!(a.menu < a.testimonials);
        assert!(a.testimonials < a.contact);
        assert!(layout.total_height_px > a.contact);
    }

    #[test]
    fn filtering_shrinks_the_page() {
        let all = layout_at(120, "all");
        let drinks = layout_at(120, "minuman");
        assert!(drinks.total_height_px < all.total_height_px);
        // Filtered-out cards are not placed at all.
        let cards = |layout: &PageLayout| {
            layout
                .blocks
                .iter()
                .filter(|b| matches!(b.id, BlockId::MenuCard(_)))
                .count()
        };
        assert!(cards(&drinks) < cards(&all));
        assert!(cards(&drinks) > 0);
    }

    #[test]
    fn narrow_layout_stacks_cards_taller() {
        let narrow = layout_at(80, "all");
        let wide = layout_at(160, "all");
        assert_eq!(narrow.menu_columns, 1);
        assert_eq!(wide.menu_columns, 3);
        assert!(narrow.total_height_px > wide.total_height_px);
    }

    #[test]
    fn section_at_tracks_scroll_with_margin() {
        let layout = layout_at(120, "all");
        let a = layout.anchors;
        assert_eq!(a.section_at(0, 100), Section::Home);
        assert_eq!(a.section_at(a.menu - 100, 100), Section::Menu);
        assert_eq!(a.section_at(a.contact + 10, 100), Section::Contact);
    }

    #[test]
    fn jump_target_subtracts_the_header() {
        let layout = layout_at(120, "all");
        assert_eq!(
            layout.anchors.jump_target(Section::Menu, 80),
            layout.anchors.menu - 80
        );
        assert_eq!(layout.anchors.jump_target(Section::Home, 80), 0);
    }

    #[test]
    fn content_row_windows_the_page() {
        // Block at the very top of the content window.
        assert_eq!(content_row(0, 0, 30), Some(HEADER_ROWS));
        // Scrolled past: off screen.
        assert_eq!(content_row(0, 320, 30), None);
        // Below the fold.
        assert_eq!(content_row(10_000, 0, 30), None);
    }

    #[test]
    fn modal_masks_the_page_behind_it() {
        let layout = layout_at(120, "all");
        let chrome = ChromeState {
            cols: 120,
            rows: 36,
            compact: false,
            nav_menu_open: false,
            modal_open: true,
            back_to_top_visible: true,
            filter_options: 4,
            dot_count: 3,
        };
        let map = hit_map(&layout, &chrome, 0);
        // A press in the far corner is the backdrop, not a nav link.
        assert_eq!(hit_test(&map, 119, 1), Some(HitTarget::ModalBackdrop));
        // Field rows resolve to fields.
        let modal = modal_rect(120, 36);
        let row = modal_field_row(modal, FieldId::Date);
        assert_eq!(
            hit_test(&map, modal.x + 3, row),
            Some(HitTarget::ModalField(FieldId::Date))
        );
    }

    #[test]
    fn carousel_controls_resolve_when_scrolled_into_view() {
        let layout = layout_at(120, "all");
        let chrome = ChromeState {
            cols: 120,
            rows: 36,
            compact: false,
            nav_menu_open: false,
            modal_open: false,
            back_to_top_visible: false,
            filter_options: 4,
            dot_count: 4,
        };
        let scroll = layout.anchors.jump_target(Section::Testimonials, 80);
        let map = hit_map(&layout, &chrome, scroll);
        assert!(
            map.iter()
                .any(|(_, t)| matches!(t, HitTarget::CarouselPrev))
        );
        assert!(
            map.iter()
                .any(|(_, t)| matches!(t, HitTarget::CarouselDot(3)))
        );
        // Hidden when scrolled back to the hero.
        let map_top = hit_map(&layout, &chrome, 0);
        assert!(
            !map_top
                .iter()
                .any(|(_, t)| matches!(t, HitTarget::CarouselPrev))
        );
    }

    #[test]
    fn compact_header_swaps_links_for_hamburger() {
        let layout = layout_at(80, "all");
        let mut chrome = ChromeState {
            cols: 80,
            rows: 30,
            compact: true,
            nav_menu_open: false,
            modal_open: false,
            back_to_top_visible: false,
            filter_options: 4,
            dot_count: 7,
        };
        let closed = hit_map(&layout, &chrome, 0);
        assert!(
            !closed
                .iter()
                .any(|(_, t)| matches!(t, HitTarget::NavLink(_)))
        );
        assert!(closed.iter().any(|(_, t)| matches!(t, HitTarget::MenuToggle)));

        chrome.nav_menu_open = true;
        let open = hit_map(&layout, &chrome, 0);
        assert!(open.iter().any(|(_, t)| matches!(t, HitTarget::NavLink(Section::Contact))));
    }
}
