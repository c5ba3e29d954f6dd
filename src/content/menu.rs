//! Menu items, category tags, and the category filter.

use serde::{Deserialize, Serialize};

/// Filter value for "show everything".
pub const FILTER_ALL: &str = "all";

/// A single menu card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Dish name.
    pub name: String,
    /// One-line description shown on the card.
    pub description: String,
    /// Price in rupiah.
    pub price_idr: u32,
    /// Category tags; a card may carry several.
    pub categories: Vec<String>,
}

impl MenuItem {
    /// Whether this card survives the given filter selection.
    ///
    /// `"all"` matches every card; otherwise the card must carry the tag.
    #[must_use]
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter == FILTER_ALL || self.categories.iter().any(|c| c == filter)
    }

    /// Price formatted the way the menu board writes it, e.g. `25K`.
    #[must_use]
    pub fn price_label(&self) -> String {
        if self.price_idr % 1000 == 0 {
            format!("{}K", self.price_idr / 1000)
        } else {
            format!("Rp{}", self.price_idr)
        }
    }
}

/// Indices of the cards that survive a filter, in menu order.
///
/// The re-show stagger is index-based: the caller delays each surviving card
/// by `position * stagger` the way the storefront staggers its fade-in.
#[must_use]
pub fn visible_indices(menu: &[MenuItem], filter: &str) -> Vec<usize> {
    menu.iter()
        .enumerate()
        .filter(|(_, item)| item.matches_filter(filter))
        .map(|(i, _)| i)
        .collect()
}

/// Built-in menu board.
#[must_use]
pub fn builtin_menu() -> Vec<MenuItem> {
    fn item(name: &str, description: &str, price_idr: u32, categories: &[&str]) -> MenuItem {
        MenuItem {
            name: name.to_owned(),
            description: description.to_owned(),
            price_idr,
            categories: categories.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    vec![
        item(
            "Nasi Goreng Kumpul",
            "Nasi goreng kampung, telur mata sapi, kerupuk",
            25_000,
            &["makanan"],
        ),
        item(
            "Mie Goreng Jawa",
            "Mie goreng manis-gurih dengan suwiran ayam",
            22_000,
            &["makanan"],
        ),
        item(
            "Ayam Bakar Madu",
            "Paha ayam bakar madu, sambal korek, lalapan",
            32_000,
            &["makanan"],
        ),
        item(
            "Sate Ayam",
            "Sepuluh tusuk, bumbu kacang, lontong",
            28_000,
            &["makanan"],
        ),
        item(
            "Es Teh Manis",
            "Teh tubruk dingin, gula batu",
            6_000,
            &["minuman"],
        ),
        item(
            "Es Jeruk Peras",
            "Jeruk peras segar, es serut",
            10_000,
            &["minuman"],
        ),
        item(
            "Kopi Tubruk",
            "Kopi hitam tubruk, panas atau dingin",
            8_000,
            &["minuman"],
        ),
        item(
            "Alpukat Kocok",
            "Alpukat mentega, susu coklat, es batu",
            15_000,
            &["minuman", "cemilan"],
        ),
        item(
            "Pisang Goreng Keju",
            "Pisang raja goreng, keju parut, susu",
            14_000,
            &["cemilan"],
        ),
        item(
            "Tahu Crispy",
            "Tahu garing, cabe bubuk, mayo",
            12_000,
            &["cemilan"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_shows_everything() {
        let menu = builtin_menu();
        assert_eq!(visible_indices(&menu, FILTER_ALL).len(), menu.len());
    }

    #[test]
    fn tag_filter_hides_nonmatching_cards() {
        let menu = builtin_menu();
        let visible = visible_indices(&menu, "minuman");
        assert!(!visible.is_empty());
        for (i, item) in menu.iter().enumerate() {
            let shown = visible.contains(&i);
            assert_eq!(shown, item.categories.iter().any(|c| c == "minuman"));
        }
    }

    #[test]
    fn multi_tag_card_matches_both_filters() {
        let menu = builtin_menu();
        let alpukat = menu.iter().position(|m| m.name == "Alpukat Kocok").unwrap();
        assert!(visible_indices(&menu, "minuman").contains(&alpukat));
        assert!(visible_indices(&menu, "cemilan").contains(&alpukat));
    }

    #[test]
    fn unknown_filter_hides_all() {
        let menu = builtin_menu();
        assert!(visible_indices(&menu, "dessert").is_empty());
    }

    #[test]
    fn price_labels() {
        let menu = builtin_menu();
        assert_eq!(menu[0].price_label(), "25K");
        let odd = MenuItem {
            name: "X".into(),
            description: String::new(),
            price_idr: 12_500,
            categories: vec![],
        };
        assert_eq!(odd.price_label(), "Rp12500");
    }
}
