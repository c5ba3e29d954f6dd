//! WhatsApp deep-link construction and the platform URL opener.
//!
//! The hand-off is fire-and-forget: once the `wa.me` link is opened in a
//! detached process, the interaction is complete. No retry, no delivery
//! confirmation.

use std::process::{Command, Stdio};

use url::Url;

use crate::booking::form::ReservationForm;
use crate::core::errors::{KioskError, Result};

/// Compose the reservation message. Field order is fixed: name, date, time,
/// note — the template the restaurant staff expects to read.
#[must_use]
pub fn reservation_message(restaurant_name: &str, form: &ReservationForm) -> String {
    format!(
        "Halo {restaurant_name} 👋\n\n\
         Saya ingin melakukan reservasi:\n\n\
         Nama: {}\n\
         Tanggal: {}\n\
         Jam: {}\n\
         Keterangan: {}\n\n\
         Terima kasih 🙏",
        form.name.trim(),
        form.date.trim(),
        form.time.trim(),
        form.note.trim(),
    )
}

/// Build the `wa.me` reservation link with the percent-encoded message.
pub fn reservation_link(phone: &str, restaurant_name: &str, form: &ReservationForm) -> Result<Url> {
    let message = reservation_message(restaurant_name, form);
    let encoded = urlencoding::encode(message.trim());
    let url = Url::parse(&format!("https://wa.me/{phone}?text={encoded}"))?;
    Ok(url)
}

/// Bare chat link for the floating WhatsApp control (no prefilled text).
pub fn chat_link(phone: &str) -> Result<Url> {
    Ok(Url::parse(&format!("https://wa.me/{phone}"))?)
}

/// Open a URL with the platform opener in a detached process.
///
/// The child inherits nothing and is not waited on — the kiosk only cares
/// that the hand-off was launched.
pub fn open_in_browser(url: &Url) -> Result<()> {
    let opener = platform_opener();
    Command::new(opener)
        .arg(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|err| KioskError::OpenerSpawn {
            details: format!("{opener}: {err}"),
        })
}

const fn platform_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}
