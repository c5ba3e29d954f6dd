//! Immutable site content: menu, testimonials, section copy.
//!
//! Content is read once at startup — either the built-in defaults or a TOML
//! file — and never changes afterward.

pub mod menu;
pub mod testimonials;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{KioskError, Result};
use menu::MenuItem;
use testimonials::Testimonial;

/// Everything the kiosk displays, fixed after load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[derive(Default)]
pub struct SiteContent {
    /// Hero tagline shown under the restaurant name.
    pub tagline: String,
    /// Ordered menu items.
    pub menu: Vec<MenuItem>,
    /// Ordered testimonial records (the carousel item set).
    pub testimonials: Vec<Testimonial>,
}

impl SiteContent {
    /// Built-in storefront content.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            tagline: "Tempat nongkrong asik & makan enak di Citra Raya".to_owned(),
            menu: menu::builtin_menu(),
            testimonials: testimonials::builtin_testimonials(),
        }
    }

    /// Load content from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| KioskError::ContentLoad {
            path: path.to_path_buf(),
            details: source.to_string(),
        })?;
        let content: Self = toml::from_str(&raw).map_err(|err| KioskError::ContentParse {
            context: "content toml",
            details: err.to_string(),
        })?;
        Ok(content)
    }

    /// Load from an optional path, falling back to the built-in set.
    ///
    /// A missing or unparseable file degrades to the built-ins; the caller
    /// gets the error back alongside usable content so it can surface a
    /// notification without losing the storefront.
    #[must_use]
    pub fn load_or_builtin(path: Option<&Path>) -> (Self, Option<KioskError>) {
        match path {
            None => (Self::builtin(), None),
            Some(p) => match Self::load(p) {
                Ok(content) => (content, None),
                Err(err) => (Self::builtin(), Some(err)),
            },
        }
    }

    /// Distinct category tags across the menu, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for item in &self.menu {
            for tag in &item.categories {
                if !seen.iter().any(|s| s == tag) {
                    seen.push(tag.clone());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_is_nonempty() {
        let content = SiteContent::builtin();
        assert!(!content.menu.is_empty());
        assert_eq!(content.testimonials.len(), 7);
    }

    #[test]
    fn categories_are_deduplicated_in_order() {
        let content = SiteContent::builtin();
        let cats = content.categories();
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[0], "makanan");
        assert!(cats.contains(&"minuman".to_owned()));
        assert!(cats.contains(&"cemilan".to_owned()));
    }

    #[test]
    fn missing_optional_file_degrades_to_builtin() {
        let (content, err) = SiteContent::load_or_builtin(Some(Path::new("/no/such/file.toml")));
        assert_eq!(content, SiteContent::builtin());
        assert_eq!(err.unwrap().code(), "WK-2001");
    }

    #[test]
    fn toml_round_trip() {
        let content = SiteContent::builtin();
        let raw = toml::to_string(&content).unwrap();
        let back: SiteContent = toml::from_str(&raw).unwrap();
        assert_eq!(content, back);
    }
}
