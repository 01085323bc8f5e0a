//! Equipment tab
//!
//! Prices are normalized to copper pieces so they can back a numeric range
//! and a numeric sort. Weapons and armor additionally carry their category
//! and group.

use super::shape::{Traits, ValueField};
use super::tables::{self, OptionTable};
use super::{DiscoveredFacets, ExtractError, SearchEntry, TabDescriptor, TabName};
use crate::filters::{CheckboxGroup, FilterState, MultiselectGroup, RangeFilter, SortOption, SortOrder};
use crate::host::Localizer;
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;

const INDEX_FIELDS: &[&str] = &[
    "system.level.value",
    "system.price.value",
    "system.category",
    "system.group",
    "system.traits.value",
    "system.traits.rarity",
    "system.publication.title",
    "system.source.value",
];

const ITEM_TYPES: &[&str] = &[
    "weapon",
    "armor",
    "shield",
    "equipment",
    "consumable",
    "treasure",
    "backpack",
    "kit",
];

/// Coin amounts of a price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Coins {
    #[serde(default)]
    pub pp: i64,
    #[serde(default)]
    pub gp: i64,
    #[serde(default)]
    pub sp: i64,
    #[serde(default)]
    pub cp: i64,
}

impl Coins {
    /// Total value in copper pieces
    #[must_use]
    pub const fn copper_value(&self) -> i64 {
        self.pp * 1000 + self.gp * 100 + self.sp * 10 + self.cp
    }
}

#[derive(Debug, Deserialize)]
struct EquipmentSystem {
    level: ValueField<i64>,
    price: ValueField<Coins>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    traits: Traits,
}

/// Weapons, armor, consumables and other physical items
#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentTab;

impl TabDescriptor for EquipmentTab {
    fn name(&self) -> TabName {
        TabName::Equipment
    }

    fn document_type(&self) -> DocumentType {
        DocumentType::Item
    }

    fn record_types(&self) -> &'static [&'static str] {
        ITEM_TYPES
    }

    fn index_fields(&self) -> &'static [&'static str] {
        INDEX_FIELDS
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        &["system.category", "system.group"]
    }

    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError> {
        let system = EquipmentSystem::deserialize(&record.system)?;
        entry.set_text("item_type", record.doc_type.clone());
        entry.set_number("level", system.level.value);
        entry.set_number("price", system.price.value.copper_value());

        let prefix = match record.doc_type.as_str() {
            "weapon" => Some("weapon"),
            "armor" => Some("armor"),
            _ => None,
        };
        if let Some(prefix) = prefix {
            if let Some(category) = system.category {
                entry.set_text(&format!("{prefix}_category"), category);
            }
            if let Some(group) = system.group {
                entry.set_text(&format!("{prefix}_group"), group);
            }
        }

        entry.set_text("rarity", system.traits.rarity());
        entry.set_list("traits", system.traits.value);
        Ok(())
    }

    fn default_filter(&self, localizer: &dyn Localizer) -> FilterState {
        let label = |key: &str| localizer.localize(key);
        FilterState::new(SortOrder::new(vec![
            SortOption::alpha("name", label("Name")),
            SortOption::numeric("level", label("Level")),
            SortOption::numeric("price", label("Price")),
        ]))
        .with_checkbox("item_type", CheckboxGroup::new("item_type", label("Item Type")))
        .with_checkbox(
            "weapon_category",
            CheckboxGroup::new("weapon_category", label("Weapon Category")),
        )
        .with_checkbox("weapon_group", CheckboxGroup::new("weapon_group", label("Weapon Group")))
        .with_checkbox(
            "armor_category",
            CheckboxGroup::new("armor_category", label("Armor Category")),
        )
        .with_checkbox("armor_group", CheckboxGroup::new("armor_group", label("Armor Group")))
        .with_checkbox("rarity", CheckboxGroup::new("rarity", label("Rarity")))
        .with_checkbox("source", CheckboxGroup::new("source", label("Source")))
        .with_multiselect("traits", MultiselectGroup::new("traits", label("Traits")))
        .with_range("level", RangeFilter::new("level", label("Level"), 0, 30))
        .with_range("price", RangeFilter::new("price", label("Price"), 0, 0))
    }

    fn option_table(&self, facet: &str) -> Option<OptionTable> {
        match facet {
            "item_type" => Some(tables::ITEM_TYPES),
            "weapon_category" => Some(tables::WEAPON_CATEGORIES),
            "weapon_group" => Some(tables::WEAPON_GROUPS),
            "armor_category" => Some(tables::ARMOR_CATEGORIES),
            "armor_group" => Some(tables::ARMOR_GROUPS),
            "rarity" => Some(tables::RARITIES),
            _ => None,
        }
    }

    fn populate_options(
        &self,
        filter: &mut FilterState,
        discovered: &DiscoveredFacets,
        localizer: &dyn Localizer,
    ) {
        super::populate_options(self, filter, discovered, localizer);
        let max_price = discovered.bounds("price").map_or(0, |(_, high)| high);
        if let Some(price) = filter.ranges.get_mut("price") {
            *price = RangeFilter::new(price.facet.clone(), price.label.clone(), 0, max_price);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EnglishLocalizer;
    use serde_json::json;

    fn extract(doc_type: &str, system: serde_json::Value) -> SearchEntry {
        let record: IndexedRecord = serde_json::from_value(json!({
            "_id": "e1",
            "name": "Item",
            "type": doc_type,
            "system": system
        }))
        .unwrap();
        let mut entry = SearchEntry::from_record(&record, DocumentType::Item);
        EquipmentTab.extract(&record, &mut entry).unwrap();
        entry
    }

    #[test]
    fn test_price_in_copper() {
        let coins = Coins {
            pp: 1,
            gp: 2,
            sp: 3,
            cp: 4,
        };
        assert_eq!(coins.copper_value(), 1234);
    }

    #[test]
    fn test_weapon_category_and_group() {
        let entry = extract(
            "weapon",
            json!({
                "level": { "value": 0 },
                "price": { "value": { "gp": 1 } },
                "category": "martial",
                "group": "sword",
                "traits": { "value": ["versatile-p"], "rarity": "common" }
            }),
        );
        assert_eq!(entry.list("weapon_category"), vec!["martial"]);
        assert_eq!(entry.list("weapon_group"), vec!["sword"]);
        assert_eq!(entry.number("price"), Some(100));
        assert!(entry.facet("armor_category").is_none());
        assert_eq!(entry.list("item_type"), vec!["weapon"]);
    }

    #[test]
    fn test_consumable_ignores_category() {
        let entry = extract(
            "consumable",
            json!({
                "level": { "value": 1 },
                "price": { "value": { "sp": 4 } },
                "category": "potion",
                "traits": { "value": [] }
            }),
        );
        assert_eq!(entry.number("price"), Some(40));
        assert!(entry.facet("weapon_category").is_none());
    }

    #[test]
    fn test_price_range_fits_discovered_prices() {
        let mut discovered = DiscoveredFacets::default();
        let entry = extract(
            "armor",
            json!({
                "level": { "value": 2 },
                "price": { "value": { "gp": 30 } },
                "category": "medium",
                "group": "chain",
                "traits": { "value": [] }
            }),
        );
        discovered.record(&entry);

        let mut filter = EquipmentTab.default_filter(&EnglishLocalizer);
        EquipmentTab.populate_options(&mut filter, &discovered, &EnglishLocalizer);
        assert_eq!(filter.ranges["price"].max, 3000);
        assert!(!filter.ranges["price"].is_narrowed());

        let groups: Vec<_> = filter.checkboxes["armor_group"]
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(groups, vec!["Chain"]);
    }
}
