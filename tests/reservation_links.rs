//! Reservation hand-off contract: template order, encoding, validation.

use warung_kiosk::booking::form::FieldValidator;
use warung_kiosk::prelude::*;

fn budi() -> ReservationForm {
    ReservationForm {
        name: "Budi".into(),
        date: "2025-05-01".into(),
        time: "19:00".into(),
        note: "window seat".into(),
        ..ReservationForm::default()
    }
}

#[test]
fn decoded_text_contains_all_fields_in_template_order() {
    let url = reservation_link("6281280609087", "Warung Kumpul 88", &budi()).unwrap();
    let encoded = url
        .query()
        .and_then(|q| q.strip_prefix("text="))
        .unwrap()
        .to_owned();
    let decoded = urlencoding::decode(&encoded).unwrap();

    let positions: Vec<usize> = ["Budi", "2025-05-01", "19:00", "window seat"]
        .iter()
        .map(|needle| decoded.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "fields out of template order");
}

#[test]
fn link_is_a_valid_https_url_to_the_fixed_number() {
    let url = reservation_link("6281280609087", "Warung Kumpul 88", &budi()).unwrap();
    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), "/6281280609087");
    // Raw URL must be fully encoded — no whitespace survives.
    assert!(!url.as_str().chars().any(char::is_whitespace));
}

#[test]
fn message_greets_the_restaurant_by_name() {
    let message = reservation_message("Warung Kumpul 88", &budi());
    assert!(message.starts_with("Halo Warung Kumpul 88"));
    assert!(message.contains("reservasi"));
    assert!(message.trim_end().ends_with("🙏"));
}

#[test]
fn validation_gates_the_link_building() {
    let validator = FieldValidator::new();

    let mut form = budi();
    form.note.clear();
    assert!(form.validate(&validator).is_ok(), "note is optional");

    form = budi();
    form.name.clear();
    assert!(form.validate(&validator).is_err());

    form = budi();
    form.date = "May 1st".into();
    assert!(form.validate(&validator).is_err());

    form = budi();
    form.time = "19:99".into();
    assert!(form.validate(&validator).is_err());
}

#[test]
fn chat_link_is_bare() {
    let url = chat_link("6281280609087").unwrap();
    assert_eq!(url.as_str(), "https://wa.me/6281280609087");
}
