//! Compiled-in clue catalog: the single source of truth for answers and
//! category membership. The category mirrored into persisted clue records is
//! advisory only and may drift; counters are always driven from this table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed clue groupings. Completing a whole category awards a bonus token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Clues hidden inside the mobile app.
    App,
    /// Clues hidden in ticket descriptions.
    Jira,
    /// Clues hidden in API payloads.
    Api,
    /// Everything else.
    Misc,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [Category::App, Category::Jira, Category::Api, Category::Misc];

    /// Lowercase wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::App => "app",
            Category::Jira => "jira",
            Category::Api => "api",
            Category::Misc => "misc",
        }
    }
}

/// Static definition of a single clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueDef {
    /// Dense identifier in `1..=50`.
    pub id: u8,
    /// Canonical lowercase answer.
    pub answer: &'static str,
    /// Category the clue counts toward.
    pub category: Category,
}

/// Number of clues in the catalog.
pub const CLUE_COUNT: usize = 50;

const fn clue(id: u8, answer: &'static str, category: Category) -> ClueDef {
    ClueDef {
        id,
        answer,
        category,
    }
}

/// The full catalog, dense over ids `1..=50`.
static CLUE_TABLE: [ClueDef; CLUE_COUNT] = [
    clue(1, "init", Category::Misc),
    clue(2, "clown", Category::App),
    clue(3, "gem", Category::App),
    clue(4, "new", Category::Misc),
    clue(5, "span", Category::App),
    clue(6, "tank", Category::App),
    clue(7, "duck", Category::App),
    clue(8, "away", Category::App),
    clue(9, "crop", Category::Misc),
    clue(10, "huge", Category::App),
    clue(11, "pass", Category::App),
    clue(12, "pick", Category::App),
    clue(13, "sweet", Category::App),
    clue(14, "marker", Category::App),
    clue(15, "lower", Category::App),
    clue(16, "horse", Category::App),
    clue(17, "catch", Category::Misc),
    clue(18, "early", Category::App),
    clue(19, "green", Category::App),
    clue(20, "bull", Category::App),
    clue(21, "black", Category::App),
    clue(22, "seek", Category::App),
    clue(23, "goat", Category::App),
    clue(24, "par", Category::App),
    clue(25, "sport", Category::Misc),
    clue(26, "gold", Category::App),
    clue(27, "play", Category::App),
    clue(28, "spine", Category::Api),
    clue(29, "bulb", Category::Api),
    clue(30, "rock", Category::Api),
    clue(31, "doll", Category::Api),
    clue(32, "jumble", Category::Api),
    clue(33, "warm", Category::Api),
    clue(34, "brain", Category::Api),
    clue(35, "crane", Category::Api),
    clue(36, "pillow", Category::Api),
    clue(37, "submit", Category::Jira),
    clue(38, "update", Category::Jira),
    clue(39, "bottom", Category::Jira),
    clue(40, "emit", Category::Jira),
    clue(41, "crawl", Category::Misc),
    clue(42, "toad", Category::Misc),
    clue(43, "mate", Category::Api),
    clue(44, "let", Category::Misc),
    clue(45, "title", Category::Api),
    clue(46, "steak", Category::Misc),
    clue(47, "true", Category::Misc),
    clue(48, "topic", Category::Misc),
    clue(49, "peer", Category::Misc),
    clue(50, "assemble", Category::Misc),
];

/// Look up a clue definition by id, `None` outside `1..=50`.
pub fn lookup(id: u8) -> Option<&'static ClueDef> {
    if id == 0 {
        return None;
    }
    CLUE_TABLE.get(usize::from(id) - 1)
}

/// Iterate the whole catalog in id order.
pub fn all() -> impl Iterator<Item = &'static ClueDef> {
    CLUE_TABLE.iter()
}

/// Count clues per category, in [`Category::ALL`] order.
pub fn category_totals() -> IndexMap<Category, u32> {
    let mut totals: IndexMap<Category, u32> =
        Category::ALL.iter().map(|category| (*category, 0)).collect();
    for def in CLUE_TABLE.iter() {
        if let Some(total) = totals.get_mut(&def.category) {
            *total += 1;
        }
    }
    totals
}

/// Normalize a raw guess the same way answers are stored: trimmed, lowercase.
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_dense_over_ids() {
        for (index, def) in CLUE_TABLE.iter().enumerate() {
            assert_eq!(usize::from(def.id), index + 1);
        }
    }

    #[test]
    fn answers_are_normalized_already() {
        for def in all() {
            assert_eq!(def.answer, normalize_guess(def.answer));
        }
    }

    #[test]
    fn lookup_inside_and_outside_range() {
        assert_eq!(lookup(1).map(|def| def.answer), Some("init"));
        assert_eq!(lookup(50).map(|def| def.answer), Some("assemble"));
        assert!(lookup(0).is_none());
        assert!(lookup(51).is_none());
    }

    #[test]
    fn category_totals_cover_every_clue() {
        let totals = category_totals();
        assert_eq!(totals.values().sum::<u32>() as usize, CLUE_COUNT);
        assert_eq!(totals[&Category::App], 22);
        assert_eq!(totals[&Category::Jira], 4);
        assert_eq!(totals[&Category::Api], 11);
        assert_eq!(totals[&Category::Misc], 13);
    }

    #[test]
    fn normalize_strips_case_and_whitespace() {
        assert_eq!(normalize_guess("Deploy"), "deploy");
        assert_eq!(normalize_guess("deploy "), "deploy");
        assert_eq!(normalize_guess("  DEPLOY  "), "deploy");
    }
}
