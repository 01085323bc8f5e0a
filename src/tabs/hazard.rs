//! Hazards tab

use super::shape::{Traits, ValueField};
use super::tables::{self, OptionTable};
use super::{ExtractError, SearchEntry, TabDescriptor, TabName};
use crate::filters::{CheckboxGroup, FilterState, MultiselectGroup, RangeFilter, SortOption, SortOrder};
use crate::host::Localizer;
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;

const INDEX_FIELDS: &[&str] = &[
    "system.details.level.value",
    "system.details.isComplex",
    "system.traits.value",
    "system.traits.rarity",
    "system.details.publication.title",
    "system.details.source.value",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Details {
    level: ValueField<i64>,
    #[serde(default)]
    is_complex: bool,
}

#[derive(Debug, Deserialize)]
struct HazardSystem {
    details: Details,
    #[serde(default)]
    traits: Traits,
}

/// Traps and environmental hazards
#[derive(Debug, Clone, Copy, Default)]
pub struct HazardTab;

impl TabDescriptor for HazardTab {
    fn name(&self) -> TabName {
        TabName::Hazard
    }

    fn document_type(&self) -> DocumentType {
        DocumentType::Actor
    }

    fn record_types(&self) -> &'static [&'static str] {
        &["hazard"]
    }

    fn index_fields(&self) -> &'static [&'static str] {
        INDEX_FIELDS
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        &["system.details.isComplex"]
    }

    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError> {
        let system = HazardSystem::deserialize(&record.system)?;
        entry.set_number("level", system.details.level.value);
        entry.set_text(
            "complexity",
            if system.details.is_complex { "complex" } else { "simple" },
        );
        entry.set_text("rarity", system.traits.rarity());
        entry.set_list("traits", system.traits.value);
        Ok(())
    }

    fn default_filter(&self, localizer: &dyn Localizer) -> FilterState {
        let label = |key: &str| localizer.localize(key);
        FilterState::new(SortOrder::new(vec![
            SortOption::alpha("name", label("Name")),
            SortOption::numeric("level", label("Level")),
        ]))
        .with_checkbox("complexity", CheckboxGroup::new("complexity", label("Complexity")))
        .with_checkbox("rarity", CheckboxGroup::new("rarity", label("Rarity")))
        .with_checkbox("source", CheckboxGroup::new("source", label("Source")))
        .with_multiselect("traits", MultiselectGroup::new("traits", label("Traits")))
        .with_range("level", RangeFilter::new("level", label("Level"), -1, 25))
    }

    fn option_table(&self, facet: &str) -> Option<OptionTable> {
        match facet {
            "complexity" => Some(tables::HAZARD_COMPLEXITY),
            "rarity" => Some(tables::RARITIES),
            _ => None,
        }
    }
}
