//! Clue text data.
//!
//! Each haunted item carries clue texts at four tiers, in a "high" and a
//! "low" variant. At gameplay init one item is selected; every clue placed
//! in the house then reads its text from that item.
//!
//! # File format
//!
//! ```json
//! { "items": [
//!   { "name": "Music box",
//!     "high": { "jackpot": "...", "specific": "...", "vague": "...", "worthless": "..." },
//!     "low":  { "jackpot": "...", "specific": "...", "vague": "...", "worthless": "..." } }
//! ] }
//! ```

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Value of a clue, from useless to decisive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClueTier {
    Worthless,
    Vague,
    Specific,
    Jackpot,
}

impl ClueTier {
    /// Map a roll in `[0, 100)` to a tier.
    ///
    /// `0..=50` Worthless, `51..=80` Vague, `81..=95` Specific, above that
    /// Jackpot.
    pub fn from_roll(roll: u32) -> ClueTier {
        if roll <= 50 {
            ClueTier::Worthless
        } else if roll <= 80 {
            ClueTier::Vague
        } else if roll <= 95 {
            ClueTier::Specific
        } else {
            ClueTier::Jackpot
        }
    }

    /// Roll a tier with `rng`.
    pub fn roll(rng: &mut fastrand::Rng) -> ClueTier {
        ClueTier::from_roll(rng.u32(0..100))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueTexts {
    pub jackpot: String,
    pub specific: String,
    pub vague: String,
    pub worthless: String,
}

impl ClueTexts {
    pub fn get(&self, tier: ClueTier) -> &str {
        match tier {
            ClueTier::Jackpot => &self.jackpot,
            ClueTier::Specific => &self.specific,
            ClueTier::Vague => &self.vague,
            ClueTier::Worthless => &self.worthless,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueItem {
    pub name: String,
    pub high: ClueTexts,
    pub low: ClueTexts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ClueTable {
    items: Vec<ClueItem>,
}

/// Provider of clue texts.
pub trait ClueSource {
    /// Replace the item table with the contents of `path`.
    fn read_file(&mut self, path: &Path) -> Result<(), EngineError>;
    /// Pick the item the clues of this round describe.
    fn select_items(&mut self, rng: &mut fastrand::Rng);
    /// Text for `tier`; `hi_low` 0 picks the high variant, anything else the low one.
    fn clue_text(&self, tier: ClueTier, hi_low: usize) -> &str;
    fn selected_item(&self) -> &str;
}

/// Item table loaded from JSON, with a built-in fallback table.
#[derive(Debug, Clone)]
pub struct ItemClueSource {
    items: Vec<ClueItem>,
    selected: usize,
}

impl ItemClueSource {
    pub fn builtin() -> Self {
        let item = |name: &str, noun: &str| ClueItem {
            name: name.to_string(),
            high: ClueTexts {
                jackpot: format!("The spirit is bound to the {noun}."),
                specific: format!("Something old and precious: a {noun}, perhaps."),
                vague: "A cold draft comes from somewhere upstairs.".to_string(),
                worthless: "Dust. Lots of dust.".to_string(),
            },
            low: ClueTexts {
                jackpot: format!("A scratched note: 'destroy the {noun}'."),
                specific: format!("Faint scratches, like those a {noun} would leave."),
                vague: "The air smells of candle wax.".to_string(),
                worthless: "A broken chair.".to_string(),
            },
        };
        Self {
            items: vec![
                item("Music box", "music box"),
                item("Portrait", "portrait"),
                item("Locket", "locket"),
                item("Doll", "doll"),
            ],
            selected: 0,
        }
    }

    pub fn from_items(items: Vec<ClueItem>) -> Self {
        if items.is_empty() {
            return Self::builtin();
        }
        Self { items, selected: 0 }
    }

    pub fn parse(json: &str) -> Result<Vec<ClueItem>, serde_json::Error> {
        serde_json::from_str::<ClueTable>(json).map(|table| table.items)
    }

    pub fn items(&self) -> &[ClueItem] {
        &self.items
    }
}

impl Default for ItemClueSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ClueSource for ItemClueSource {
    fn read_file(&mut self, path: &Path) -> Result<(), EngineError> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ClueDataIo {
            path: path.to_path_buf(),
            source,
        })?;
        let items = Self::parse(&text).map_err(|source| EngineError::ClueDataParse {
            path: path.to_path_buf(),
            source,
        })?;
        if items.is_empty() {
            warn!("{:?} has no clue items, keeping current table", path);
            return Ok(());
        }
        info!("loaded {} clue items from {:?}", items.len(), path);
        self.items = items;
        self.selected = 0;
        Ok(())
    }

    fn select_items(&mut self, rng: &mut fastrand::Rng) {
        self.selected = rng.usize(0..self.items.len());
        info!("haunted item: {}", self.items[self.selected].name);
    }

    fn clue_text(&self, tier: ClueTier, hi_low: usize) -> &str {
        let item = &self.items[self.selected];
        if hi_low == 0 {
            item.high.get(tier)
        } else {
            item.low.get(tier)
        }
    }

    fn selected_item(&self) -> &str {
        &self.items[self.selected].name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_thresholds() {
        let expected = [
            (0, ClueTier::Worthless),
            (50, ClueTier::Worthless),
            (51, ClueTier::Vague),
            (80, ClueTier::Vague),
            (81, ClueTier::Specific),
            (95, ClueTier::Specific),
            (96, ClueTier::Jackpot),
            (99, ClueTier::Jackpot),
        ];
        for (roll, tier) in expected {
            assert_eq!(ClueTier::from_roll(roll), tier, "roll {roll}");
        }
    }

    #[test]
    fn test_roll_distribution_covers_every_tier() {
        let mut counts = [0usize; 4];
        for roll in 0..100 {
            counts[ClueTier::from_roll(roll) as usize] += 1;
        }
        assert_eq!(counts, [51, 30, 15, 4]);
    }

    #[test]
    fn test_builtin_texts_by_hi_low() {
        let source = ItemClueSource::builtin();
        assert!(source.clue_text(ClueTier::Jackpot, 0).contains("bound"));
        assert!(source.clue_text(ClueTier::Jackpot, 1).contains("destroy"));
        assert_eq!(source.selected_item(), "Music box");
    }

    #[test]
    fn test_read_file_replaces_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let texts = r#"{"jackpot":"j","specific":"s","vague":"v","worthless":"w"}"#;
        std::fs::write(
            &path,
            format!(r#"{{"items":[{{"name":"Mirror","high":{texts},"low":{texts}}}]}}"#),
        )
        .unwrap();

        let mut source = ItemClueSource::builtin();
        source.read_file(&path).unwrap();
        source.select_items(&mut fastrand::Rng::with_seed(3));
        assert_eq!(source.selected_item(), "Mirror");
        assert_eq!(source.clue_text(ClueTier::Vague, 1), "v");
    }

    #[test]
    fn test_read_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        let mut source = ItemClueSource::builtin();
        assert!(matches!(
            source.read_file(&bad),
            Err(EngineError::ClueDataParse { .. })
        ));
        assert!(matches!(
            source.read_file(&dir.path().join("nope.json")),
            Err(EngineError::ClueDataIo { .. })
        ));
        assert_eq!(source.items().len(), 4);
    }
}
