//! Bestiary tab

use super::shape::{Traits, ValueField};
use super::tables::{self, OptionTable};
use super::{ExtractError, SearchEntry, TabDescriptor, TabName};
use crate::filters::{CheckboxGroup, FilterState, MultiselectGroup, RangeFilter, SortOption, SortOrder};
use crate::host::Localizer;
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;

const INDEX_FIELDS: &[&str] = &[
    "system.details.level.value",
    "system.traits.value",
    "system.traits.rarity",
    "system.traits.size.value",
    "system.details.publication.title",
    "system.details.source.value",
];

#[derive(Debug, Deserialize)]
struct Details {
    level: ValueField<i64>,
}

#[derive(Debug, Deserialize)]
struct CreatureTraits {
    #[serde(flatten)]
    common: Traits,
    size: ValueField<String>,
}

#[derive(Debug, Deserialize)]
struct NpcSystem {
    details: Details,
    traits: CreatureTraits,
}

/// Non-player creatures
#[derive(Debug, Clone, Copy, Default)]
pub struct BestiaryTab;

impl TabDescriptor for BestiaryTab {
    fn name(&self) -> TabName {
        TabName::Bestiary
    }

    fn document_type(&self) -> DocumentType {
        DocumentType::Actor
    }

    fn record_types(&self) -> &'static [&'static str] {
        &["npc"]
    }

    fn index_fields(&self) -> &'static [&'static str] {
        INDEX_FIELDS
    }

    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError> {
        let system = NpcSystem::deserialize(&record.system)?;
        entry.set_number("level", system.details.level.value);
        entry.set_text("size", system.traits.size.value);
        entry.set_text("rarity", system.traits.common.rarity());
        entry.set_list("traits", system.traits.common.value);
        Ok(())
    }

    fn default_filter(&self, localizer: &dyn Localizer) -> FilterState {
        let label = |key: &str| localizer.localize(key);
        FilterState::new(SortOrder::new(vec![
            SortOption::alpha("name", label("Name")),
            SortOption::numeric("level", label("Level")),
        ]))
        .with_checkbox("size", CheckboxGroup::new("size", label("Size")))
        .with_checkbox("rarity", CheckboxGroup::new("rarity", label("Rarity")))
        .with_checkbox("source", CheckboxGroup::new("source", label("Source")))
        .with_multiselect("traits", MultiselectGroup::new("traits", label("Traits")))
        .with_range("level", RangeFilter::new("level", label("Level"), -1, 25))
    }

    fn option_table(&self, facet: &str) -> Option<OptionTable> {
        match facet {
            "size" => Some(tables::SIZES),
            "rarity" => Some(tables::RARITIES),
            _ => None,
        }
    }
}
