//! Testimonial records — the carousel's fixed item set.

use serde::{Deserialize, Serialize};

/// A guest quote shown in the carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    /// Guest name.
    pub author: String,
    /// Quote body.
    pub quote: String,
    /// Star rating, 1–5.
    pub rating: u8,
}

impl Testimonial {
    /// Star string for rendering, e.g. `★★★★☆`.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        let mut s = "★".repeat(filled);
        s.push_str(&"☆".repeat(5 - filled));
        s
    }
}

/// Built-in guest quotes.
#[must_use]
pub fn builtin_testimonials() -> Vec<Testimonial> {
    fn quote(author: &str, quote: &str, rating: u8) -> Testimonial {
        Testimonial {
            author: author.to_owned(),
            quote: quote.to_owned(),
            rating,
        }
    }

    vec![
        quote(
            "Budi",
            "Nasi gorengnya juara, porsinya pas buat nongkrong lama.",
            5,
        ),
        quote(
            "Sari",
            "Tempatnya adem, wifi kencang, cocok buat kerja sore.",
            5,
        ),
        quote("Agus", "Sate ayamnya empuk, bumbu kacangnya nagih.", 4),
        quote(
            "Dewi",
            "Alpukat kocoknya creamy banget, anak-anak suka.",
            5,
        ),
        quote("Rina", "Harga bersahabat, pelayanan cepat dan ramah.", 4),
        quote(
            "Joko",
            "Langganan tiap weekend, ayam bakar madunya konsisten.",
            5,
        ),
        quote("Maya", "Pisang goreng kejunya wajib coba kalau mampir.", 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_builtin_quotes() {
        assert_eq!(builtin_testimonials().len(), 7);
    }

    #[test]
    fn stars_render_five_glyphs() {
        for t in builtin_testimonials() {
            assert_eq!(t.stars().chars().count(), 5);
        }
    }

    #[test]
    fn stars_clamp_overflow_ratings() {
        let t = Testimonial {
            author: "X".into(),
            quote: String::new(),
            rating: 9,
        };
        assert_eq!(t.stars(), "★★★★★");
    }
}
