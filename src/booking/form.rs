//! Reservation form state and field validation.
//!
//! Mirrors the storefront form: four named fields, with only native-style
//! required/format enforcement. Name, date, and time are required; the note
//! is freeform and optional.

use regex::Regex;

use crate::core::errors::{KioskError, Result};

/// The four form fields, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldId {
    #[default]
    Name,
    Date,
    Time,
    Note,
}

impl FieldId {
    /// Next field in tab order, wrapping Note → Name.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Date,
            Self::Date => Self::Time,
            Self::Time => Self::Note,
            Self::Note => Self::Name,
        }
    }

    /// Previous field in tab order, wrapping Name → Note.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Note,
            Self::Date => Self::Name,
            Self::Time => Self::Date,
            Self::Note => Self::Time,
        }
    }

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Nama",
            Self::Date => "Tanggal",
            Self::Time => "Jam",
            Self::Note => "Keterangan",
        }
    }

    /// Placeholder hint shown in an empty field.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "nama pemesan",
            Self::Date => "YYYY-MM-DD",
            Self::Time => "HH:MM",
            Self::Note => "opsional",
        }
    }
}

/// Validates date/time field formats. Regexes are compiled once at
/// construction; a pattern that fails to compile disables that format check
/// (required-ness is still enforced) instead of taking the form down.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    date: Option<Regex>,
    time: Option<Regex>,
}

impl FieldValidator {
    /// Compile the field format patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            date: Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok(),
            time: Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").ok(),
        }
    }

    /// Check a date string in `YYYY-MM-DD` form.
    #[must_use]
    pub fn date_ok(&self, raw: &str) -> bool {
        self.date.as_ref().is_none_or(|re| re.is_match(raw))
    }

    /// Check a time string in 24h `HH:MM` form.
    #[must_use]
    pub fn time_ok(&self, raw: &str) -> bool {
        self.time.as_ref().is_none_or(|re| re.is_match(raw))
    }
}

/// Editable reservation form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    /// Guest name (required).
    pub name: String,
    /// Reservation date (required, `YYYY-MM-DD`).
    pub date: String,
    /// Reservation time (required, `HH:MM`).
    pub time: String,
    /// Freeform note (optional).
    pub note: String,
    /// Field currently holding focus.
    pub focused: FieldId,
}

impl ReservationForm {
    /// Mutable access to the focused field's buffer.
    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FieldId::Name => &mut self.name,
            FieldId::Date => &mut self.date,
            FieldId::Time => &mut self.time,
            FieldId::Note => &mut self.note,
        }
    }

    /// Read access to a field's buffer.
    #[must_use]
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Date => &self.date,
            FieldId::Time => &self.time,
            FieldId::Note => &self.note,
        }
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Append a typed character to the focused field.
    pub fn type_char(&mut self, ch: char) {
        self.focused_value_mut().push(ch);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
    }

    /// Clear every field and reset focus — the post-submit reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Enforce required fields and formats. Returns the first offending
    /// field so the UI can focus it.
    pub fn validate(&self, validator: &FieldValidator) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(KioskError::InvalidReservation {
                field: "name",
                details: "required".to_owned(),
            });
        }
        if self.date.trim().is_empty() {
            return Err(KioskError::InvalidReservation {
                field: "date",
                details: "required".to_owned(),
            });
        }
        if !validator.date_ok(self.date.trim()) {
            return Err(KioskError::InvalidReservation {
                field: "date",
                details: format!("expected YYYY-MM-DD, got {:?}", self.date),
            });
        }
        if self.time.trim().is_empty() {
            return Err(KioskError::InvalidReservation {
                field: "time",
                details: "required".to_owned(),
            });
        }
        if !validator.time_ok(self.time.trim()) {
            return Err(KioskError::InvalidReservation {
                field: "time",
                details: format!("expected HH:MM, got {:?}", self.time),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReservationForm {
        ReservationForm {
            name: "Budi".into(),
            date: "2025-05-01".into(),
            time: "19:00".into(),
            note: "window seat".into(),
            focused: FieldId::Name,
        }
    }

    #[test]
    fn tab_order_cycles_all_four_fields() {
        let mut f = FieldId::Name;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, FieldId::Name);
        assert_eq!(FieldId::Name.prev(), FieldId::Note);
        for field in [FieldId::Name, FieldId::Date, FieldId::Time, FieldId::Note] {
            assert_eq!(field.next().prev(), field);
        }
    }

    #[test]
    fn typing_targets_the_focused_field() {
        let mut form = ReservationForm::default();
        form.type_char('B');
        form.type_char('u');
        form.focus_next();
        form.type_char('2');
        assert_eq!(form.name, "Bu");
        assert_eq!(form.date, "2");
        form.backspace();
        assert_eq!(form.date, "");
    }

    #[test]
    fn valid_form_passes() {
        filled().validate(&FieldValidator::new()).unwrap();
    }

    #[test]
    fn note_is_optional() {
        let mut form = filled();
        form.note.clear();
        form.validate(&FieldValidator::new()).unwrap();
    }

    #[test]
    fn missing_name_rejected() {
        let mut form = filled();
        form.name = "  ".into();
        let err = form.validate(&FieldValidator::new()).unwrap_err();
        assert_eq!(err.code(), "WK-3001");
    }

    #[test]
    fn bad_date_format_rejected() {
        let mut form = filled();
        form.date = "01/05/2025".into();
        assert!(form.validate(&FieldValidator::new()).is_err());
    }

    #[test]
    fn bad_time_format_rejected() {
        let validator = FieldValidator::new();
        for bad in ["25:00", "7pm", "19:60", "19.00"] {
            let mut form = filled();
            form.time = bad.into();
            assert!(form.validate(&validator).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = filled();
        form.focused = FieldId::Time;
        form.reset();
        assert_eq!(form, ReservationForm::default());
    }
}
