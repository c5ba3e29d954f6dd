//! Reservation flow: form model, validation, and the WhatsApp hand-off.

pub mod form;
pub mod whatsapp;

pub use form::{FieldId, ReservationForm};
pub use whatsapp::{chat_link, reservation_link, reservation_message};
