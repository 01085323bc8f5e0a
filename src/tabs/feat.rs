//! Feats tab

use super::shape::{ActionCount, OptionalValue, Traits, ValueField, action_cost_key};
use super::tables::{self, OptionTable};
use super::{ExtractError, SearchEntry, TabDescriptor, TabName};
use crate::filters::{CheckboxGroup, FilterState, MultiselectGroup, RangeFilter, SortOption, SortOrder};
use crate::host::Localizer;
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;

const INDEX_FIELDS: &[&str] = &[
    "system.level.value",
    "system.category",
    "system.actionType.value",
    "system.actions.value",
    "system.traits.value",
    "system.traits.rarity",
    "system.publication.title",
    "system.source.value",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatSystem {
    level: ValueField<i64>,
    category: String,
    action_type: ValueField<String>,
    #[serde(default)]
    actions: OptionalValue<ActionCount>,
    #[serde(default)]
    traits: Traits,
}

/// Feats, with ancestry, class and skill facets read from the trait list
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatTab;

fn traits_in(traits: &Traits, table: OptionTable) -> Vec<String> {
    traits
        .value
        .iter()
        .filter(|t| table.contains(t))
        .cloned()
        .collect()
}

impl TabDescriptor for FeatTab {
    fn name(&self) -> TabName {
        TabName::Feat
    }

    fn document_type(&self) -> DocumentType {
        DocumentType::Item
    }

    fn record_types(&self) -> &'static [&'static str] {
        &["feat"]
    }

    fn index_fields(&self) -> &'static [&'static str] {
        INDEX_FIELDS
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        &["system.actions.value"]
    }

    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError> {
        let system = FeatSystem::deserialize(&record.system)?;
        entry.set_number("level", system.level.value);
        entry.set_text("category", system.category);
        entry.set_text(
            "actions",
            action_cost_key(&system.action_type.value, system.actions.value),
        );
        entry.set_list("ancestry", traits_in(&system.traits, tables::ANCESTRIES));
        entry.set_list("class", traits_in(&system.traits, tables::CLASSES));
        entry.set_list("skills", traits_in(&system.traits, tables::SKILLS));
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
        .with_checkbox("category", CheckboxGroup::new("category", label("Category")))
        .with_checkbox("actions", CheckboxGroup::new("actions", label("Actions")))
        .with_checkbox("ancestry", CheckboxGroup::new("ancestry", label("Ancestry")))
        .with_checkbox("class", CheckboxGroup::new("class", label("Class")))
        .with_checkbox("skills", CheckboxGroup::new("skills", label("Skills")))
        .with_checkbox("rarity", CheckboxGroup::new("rarity", label("Rarity")))
        .with_checkbox("source", CheckboxGroup::new("source", label("Source")))
        .with_multiselect("traits", MultiselectGroup::new("traits", label("Traits")))
        .with_range("level", RangeFilter::new("level", label("Level"), 0, 20))
    }

    fn option_table(&self, facet: &str) -> Option<OptionTable> {
        match facet {
            "category" => Some(tables::FEAT_CATEGORIES),
            "actions" => Some(tables::ACTION_COSTS),
            "ancestry" => Some(tables::ANCESTRIES),
            "class" => Some(tables::CLASSES),
            "skills" => Some(tables::SKILLS),
            "rarity" => Some(tables::RARITIES),
            _ => None,
        }
    }
}
