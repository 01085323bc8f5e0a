//! Actions tab

use super::shape::{ActionCount, OptionalValue, Traits, ValueField, action_cost_key};
use super::tables::{self, OptionTable};
use super::{ExtractError, SearchEntry, TabDescriptor, TabName};
use crate::filters::{CheckboxGroup, FilterState, MultiselectGroup, SortOption, SortOrder};
use crate::host::Localizer;
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;

const INDEX_FIELDS: &[&str] = &[
    "system.actionType.value",
    "system.actions.value",
    "system.category",
    "system.traits.value",
    "system.publication.title",
    "system.source.value",
];

const ICON_ROOT: &str = "systems/pf2e/icons/actions";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionSystem {
    action_type: ValueField<String>,
    #[serde(default)]
    actions: OptionalValue<ActionCount>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    traits: Traits,
}

/// Icon path for an action cost key
#[must_use]
pub fn action_icon(cost: &str) -> String {
    let file = match cost {
        "1" => "OneAction",
        "2" => "TwoActions",
        "3" => "ThreeActions",
        "reaction" => "Reaction",
        "free" => "FreeAction",
        _ => "Passive",
    };
    format!("{ICON_ROOT}/{file}.webp")
}

/// Basic, skill and class actions
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionTab;

impl TabDescriptor for ActionTab {
    fn name(&self) -> TabName {
        TabName::Action
    }

    fn document_type(&self) -> DocumentType {
        DocumentType::Item
    }

    fn record_types(&self) -> &'static [&'static str] {
        &["action"]
    }

    fn index_fields(&self) -> &'static [&'static str] {
        INDEX_FIELDS
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        &["system.actions.value", "system.category"]
    }

    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError> {
        let system = ActionSystem::deserialize(&record.system)?;
        let action_type = system.action_type.value;
        let cost = action_cost_key(&action_type, system.actions.value);

        entry.set_text("icon", action_icon(&cost));
        if entry.img.is_empty() {
            entry.img = action_icon(&cost);
        }
        entry.set_text("action_type", action_type);
        entry.set_text("actions", cost);
        if let Some(category) = system.category {
            entry.set_text("category", category);
        }
        entry.set_list("traits", system.traits.value);
        Ok(())
    }

    fn default_filter(&self, localizer: &dyn Localizer) -> FilterState {
        let label = |key: &str| localizer.localize(key);
        FilterState::new(SortOrder::new(vec![SortOption::alpha("name", label("Name"))]))
            .with_checkbox("action_type", CheckboxGroup::new("action_type", label("Action Type")))
            .with_checkbox("actions", CheckboxGroup::new("actions", label("Actions")))
            .with_checkbox("category", CheckboxGroup::new("category", label("Category")))
            .with_checkbox("source", CheckboxGroup::new("source", label("Source")))
            .with_multiselect("traits", MultiselectGroup::new("traits", label("Traits")))
    }

    fn option_table(&self, facet: &str) -> Option<OptionTable> {
        match facet {
            "action_type" => Some(tables::ACTION_TYPES),
            "actions" => Some(tables::ACTION_COSTS),
            "category" => Some(tables::ACTION_CATEGORIES),
            _ => None,
        }
    }
}
