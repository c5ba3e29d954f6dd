//! End-to-end flows driven through the pure update function: the kiosk
//! behaves like the storefront without a terminal attached.

use std::time::{Duration, Instant};

use warung_kiosk::content::SiteContent;
use warung_kiosk::logger::SessionEvent;
use warung_kiosk::prelude::*;
use warung_kiosk::ui::input::Key;
use warung_kiosk::ui::preferences::PreferenceSource;

fn model_at(cols: u16, rows: u16) -> (KioskModel, Instant) {
    let now = Instant::now();
    let model = KioskModel::new(
        Config::default(),
        SiteContent::builtin(),
        Theme::Light,
        PreferenceSource::Defaults,
        (cols, rows),
        now,
    );
    (model, now)
}

fn key(model: &mut KioskModel, k: Key, now: Instant) -> KioskCmd {
    update(model, KioskMsg::Key(k), now)
}

fn tick(model: &mut KioskModel, now: Instant) -> KioskCmd {
    update(model, KioskMsg::Tick, now)
}

#[test]
fn seven_items_wide_viewport_three_pages_and_wrap() {
    // 160 cols → 1280 px > 1024 → capacity 3 → ceil(7/3) = 3 pages.
    let (mut model, now) = model_at(160, 40);
    assert_eq!(model.carousel.capacity(), 3);
    assert_eq!(model.carousel.page_count(), 3);

    key(&mut model, Key::Right, now);
    key(&mut model, Key::Right, now);
    assert_eq!(model.carousel.current_page(), 2);
    // `next` from the last page wraps to 0.
    key(&mut model, Key::Right, now);
    assert_eq!(model.carousel.current_page(), 0);
}

#[test]
fn narrow_viewport_one_per_page_goto_clamps() {
    // 90 cols → 720 px ≤ 768 → capacity 1 → 7 pages.
    let (mut model, now) = model_at(90, 40);
    assert_eq!(model.carousel.capacity(), 1);
    assert_eq!(model.carousel.page_count(), 7);

    model.carousel.go_to(99, now);
    assert_eq!(model.carousel.current_page(), 6);
}

#[test]
fn debounced_resize_holds_invariants() {
    let (mut model, now) = model_at(160, 40);
    let items = model.content.testimonials.len();

    // A drag-resize burst: many sizes inside the 250 ms window.
    for (i, cols) in (60..=120).step_by(10).enumerate() {
        update(
            &mut model,
            KioskMsg::Resize { cols, rows: 40 },
            now + Duration::from_millis(i as u64 * 30),
        );
    }
    // Nothing recomputed during the burst.
    assert_eq!(model.carousel.capacity(), 3);

    // Trailing edge: only the final 120-col size lands.
    tick(&mut model, now + Duration::from_secs(1));
    let capacity = model.config.breakpoints.capacity_for(960);
    assert_eq!(model.carousel.capacity(), capacity);
    assert_eq!(model.carousel.page_count(), items.div_ceil(capacity));
    assert!(model.carousel.current_page() < model.carousel.page_count());
    assert_eq!(model.carousel.current_page(), 0);
}

#[test]
fn category_filter_hides_and_staggers() {
    let (mut model, now) = model_at(120, 36);
    let minuman: Vec<usize> = model
        .content
        .menu
        .iter()
        .enumerate()
        .filter(|(_, m)| m.categories.iter().any(|c| c == "minuman"))
        .map(|(i, _)| i)
        .collect();

    // Cycle to "minuman": all → makanan → minuman.
    key(&mut model, Key::Char('f'), now);
    key(&mut model, Key::Char('f'), now);
    assert_eq!(model.filter, "minuman");

    // Only minuman cards are placed in the layout.
    let placed: Vec<usize> = model
        .layout
        .blocks
        .iter()
        .filter_map(|b| match b.id {
            warung_kiosk::ui::layout::BlockId::MenuCard(i) => Some(i),
            _ => None,
        })
        .collect();
    assert_eq!(placed, minuman);

    // Staggered re-entry completes after count * stagger.
    let step = Duration::from_millis(model.config.motion.filter_stagger_ms);
    tick(&mut model, now + step * (minuman.len() as u32 + 1));
    for i in &placed {
        assert!(model.is_block_visible(warung_kiosk::ui::layout::BlockId::MenuCard(*i)));
    }

    // Back to "all": every card placed again.
    key(&mut model, Key::Char('f'), now);
    key(&mut model, Key::Char('f'), now);
    assert_eq!(model.filter, FILTER_ALL);
    let placed_all = model
        .layout
        .blocks
        .iter()
        .filter(|b| matches!(b.id, warung_kiosk::ui::layout::BlockId::MenuCard(_)))
        .count();
    assert_eq!(placed_all, model.content.menu.len());
}

#[test]
fn reservation_example_from_the_storefront() {
    let (mut model, now) = model_at(120, 36);
    key(&mut model, Key::Char('r'), now);

    for c in "Budi".chars() {
        key(&mut model, Key::Char(c), now);
    }
    key(&mut model, Key::Tab, now);
    for c in "2025-05-01".chars() {
        key(&mut model, Key::Char(c), now);
    }
    key(&mut model, Key::Tab, now);
    for c in "19:00".chars() {
        key(&mut model, Key::Char(c), now);
    }
    key(&mut model, Key::Tab, now);
    for c in "window seat".chars() {
        key(&mut model, Key::Char(c), now);
    }

    let cmd = key(&mut model, Key::Enter, now);
    let KioskCmd::Batch(cmds) = cmd else {
        panic!("expected a batch, got {cmd:?}");
    };
    let url = cmds
        .iter()
        .find_map(|c| match c {
            KioskCmd::OpenUrl(u) => Some(u.clone()),
            _ => None,
        })
        .expect("an OpenUrl command");
    let decoded = urlencoding::decode(url.split("text=").nth(1).unwrap()).unwrap();
    let order: Vec<usize> = ["Budi", "2025-05-01", "19:00", "window seat"]
        .iter()
        .map(|n| decoded.find(n).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    // Modal closed and the form reset.
    assert!(model.overlay.is_none());
    assert_eq!(model.reservation, ReservationForm::default());
}

#[test]
fn autoplay_cadence_is_five_seconds_per_page() {
    let (mut model, now) = model_at(160, 40);
    tick(&mut model, now + Duration::from_millis(4999));
    assert_eq!(model.carousel.current_page(), 0);
    tick(&mut model, now + Duration::from_millis(5000));
    assert_eq!(model.carousel.current_page(), 1);
    // The next advance is a full period later, not immediate.
    tick(&mut model, now + Duration::from_millis(5100));
    assert_eq!(model.carousel.current_page(), 1);
    tick(&mut model, now + Duration::from_millis(10_000));
    assert_eq!(model.carousel.current_page(), 2);
}

#[test]
fn theme_toggle_round_trips_and_requests_persistence() {
    let (mut model, now) = model_at(120, 36);
    let cmd = key(&mut model, Key::Char('t'), now);
    assert_eq!(model.theme, Theme::Dark);
    let KioskCmd::Batch(cmds) = cmd else {
        panic!("expected a batch");
    };
    assert!(cmds.iter().any(|c| matches!(c, KioskCmd::SaveTheme)));
    assert!(cmds.iter().any(|c| matches!(
        c,
        KioskCmd::Log(SessionEvent::ThemeChanged { .. })
    )));

    key(&mut model, Key::Char('t'), now);
    assert_eq!(model.theme, Theme::Light);
}

#[test]
fn empty_testimonials_degrade_silently() {
    let now = Instant::now();
    let mut content = SiteContent::builtin();
    content.testimonials.clear();
    let mut model = KioskModel::new(
        Config::default(),
        content,
        Theme::Light,
        PreferenceSource::Defaults,
        (120, 36),
        now,
    );
    assert!(model.carousel.is_empty());

    // Navigation and timers are inert, everything else still runs.
    update(&mut model, KioskMsg::Key(Key::Right), now);
    update(&mut model, KioskMsg::Key(Key::Left), now);
    update(&mut model, KioskMsg::Tick, now + Duration::from_secs(10));
    assert_eq!(model.carousel.current_page(), 0);
    update(&mut model, KioskMsg::Key(Key::Char('f')), now);
    assert_eq!(model.filter, "makanan");
}

#[test]
fn nav_jump_scrolls_smoothly_to_the_section() {
    let (mut model, now) = model_at(120, 36);
    key(&mut model, Key::Char('2'), now);
    assert_eq!(model.active_section, Section::Menu);

    let target = model.scroll_target_px;
    assert!(target > 0.0);

    // Smooth scroll: position converges over ticks without overshoot.
    let mut t = now;
    for _ in 0..200 {
        t += Duration::from_millis(50);
        tick(&mut model, t);
        assert!(model.scroll_px <= target + 0.5);
    }
    assert!((model.scroll_px - target).abs() < 1.0);
}
