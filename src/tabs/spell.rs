//! Spells tab
//!
//! Cantrips and focus spells keep their numeric rank for range-style
//! filtering but display as `C` and `F`. The category facet tells the four
//! kinds of spell apart.

use super::shape::{OptionalValue, Traits, ValueField};
use super::tables::{self, OptionTable};
use super::{ExtractError, SearchEntry, TabDescriptor, TabName};
use crate::filters::{CheckboxGroup, FilterState, MultiselectGroup, SortOption, SortOrder};
use crate::host::Localizer;
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;
use serde_json::Value;

const INDEX_FIELDS: &[&str] = &[
    "system.level.value",
    "system.time.value",
    "system.ritual",
    "system.traits.value",
    "system.traits.rarity",
    "system.traits.traditions",
    "system.publication.title",
    "system.source.value",
];

#[derive(Debug, Deserialize)]
struct SpellTraits {
    #[serde(flatten)]
    common: Traits,
    #[serde(default)]
    traditions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SpellSystem {
    level: ValueField<i64>,
    #[serde(default)]
    time: OptionalValue<String>,
    #[serde(default)]
    ritual: Option<Value>,
    traits: SpellTraits,
}

/// Kind of spell, as offered by the category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellCategory {
    Cantrip,
    Focus,
    Ritual,
    Spell,
}

impl SpellCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cantrip => "cantrip",
            Self::Focus => "focus",
            Self::Ritual => "ritual",
            Self::Spell => "spell",
        }
    }
}

fn category(traits: &Traits, ritual: bool) -> SpellCategory {
    if traits.has("focus") {
        SpellCategory::Focus
    } else if traits.has("cantrip") {
        SpellCategory::Cantrip
    } else if ritual {
        SpellCategory::Ritual
    } else {
        SpellCategory::Spell
    }
}

/// Display label of a spell's rank
#[must_use]
pub fn rank_label(rank: i64, cantrip: bool, focus: bool) -> String {
    if cantrip {
        "C".to_string()
    } else if focus {
        "F".to_string()
    } else {
        rank.to_string()
    }
}

/// Spells of all traditions, rituals and focus spells
#[derive(Debug, Clone, Copy, Default)]
pub struct SpellTab;

impl TabDescriptor for SpellTab {
    fn name(&self) -> TabName {
        TabName::Spell
    }

    fn document_type(&self) -> DocumentType {
        DocumentType::Item
    }

    fn record_types(&self) -> &'static [&'static str] {
        &["spell"]
    }

    fn index_fields(&self) -> &'static [&'static str] {
        INDEX_FIELDS
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        &["system.ritual", "system.time.value"]
    }

    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError> {
        let system = SpellSystem::deserialize(&record.system)?;
        let traits = system.traits.common;
        let rank = system.level.value;
        let is_ritual = system.ritual.is_some_and(|ritual| !ritual.is_null());

        entry.set_number("rank", rank);
        entry.set_text(
            "rank_label",
            rank_label(rank, traits.has("cantrip"), traits.has("focus")),
        );
        entry.set_text("category", category(&traits, is_ritual).as_str());
        entry.set_list("traditions", system.traits.traditions);
        if let Some(time) = system.time.value {
            entry.set_text("time", time.trim().to_lowercase());
        }
        entry.set_text("rarity", traits.rarity());
        entry.set_list("traits", traits.value);
        Ok(())
    }

    fn default_filter(&self, localizer: &dyn Localizer) -> FilterState {
        let label = |key: &str| localizer.localize(key);
        FilterState::new(SortOrder::new(vec![
            SortOption::alpha("name", label("Name")),
            SortOption::numeric("rank", label("Rank")),
        ]))
        .with_checkbox("category", CheckboxGroup::new("category", label("Category")))
        .with_checkbox("rank", CheckboxGroup::new("rank", label("Rank")))
        .with_checkbox("traditions", CheckboxGroup::new("traditions", label("Traditions")))
        .with_checkbox("time", CheckboxGroup::new("time", label("Cast")))
        .with_checkbox("rarity", CheckboxGroup::new("rarity", label("Rarity")))
        .with_checkbox("source", CheckboxGroup::new("source", label("Source")))
        .with_multiselect("traits", MultiselectGroup::new("traits", label("Traits")))
    }

    fn option_table(&self, facet: &str) -> Option<OptionTable> {
        match facet {
            "category" => Some(tables::SPELL_CATEGORIES),
            "rank" => Some(tables::SPELL_RANKS),
            "traditions" => Some(tables::TRADITIONS),
            "time" => Some(tables::CAST_TIMES),
            "rarity" => Some(tables::RARITIES),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(system: serde_json::Value) -> SearchEntry {
        let record: IndexedRecord = serde_json::from_value(json!({
            "_id": "s1",
            "name": "Test Spell",
            "type": "spell",
            "system": system
        }))
        .unwrap();
        let mut entry = SearchEntry::from_record(&record, DocumentType::Item);
        SpellTab.extract(&record, &mut entry).unwrap();
        entry
    }

    #[test]
    fn test_cantrip_label() {
        let entry = extract(json!({
            "level": { "value": 1 },
            "time": { "value": "2" },
            "traits": { "value": ["cantrip", "fire"], "rarity": "common", "traditions": ["arcane", "primal"] }
        }));
        assert_eq!(entry.list("rank_label"), vec!["C"]);
        assert_eq!(entry.list("category"), vec!["cantrip"]);
        assert_eq!(entry.number("rank"), Some(1));
        assert_eq!(entry.list("traditions"), vec!["arcane", "primal"]);
        assert_eq!(entry.list("time"), vec!["2"]);
    }

    #[test]
    fn test_focus_and_ritual() {
        let focus = extract(json!({
            "level": { "value": 1 },
            "traits": { "value": ["focus", "bard"], "traditions": [] }
        }));
        assert_eq!(focus.list("rank_label"), vec!["F"]);
        assert_eq!(focus.list("category"), vec!["focus"]);

        let ritual = extract(json!({
            "level": { "value": 5 },
            "ritual": { "primary": { "check": "religion" } },
            "time": { "value": "1 day" },
            "traits": { "value": [] }
        }));
        assert_eq!(ritual.list("category"), vec!["ritual"]);
        assert_eq!(ritual.list("rank_label"), vec!["5"]);
    }

    #[test]
    fn test_null_ritual_is_a_spell() {
        let spell = extract(json!({
            "level": { "value": 3 },
            "ritual": null,
            "time": { "value": "Reaction" },
            "traits": { "value": ["fire"], "traditions": ["arcane"] }
        }));
        assert_eq!(spell.list("category"), vec!["spell"]);
        assert_eq!(spell.list("time"), vec!["reaction"]);
    }
}
