//! Testing utilities for compendium
//!
//! Fixture packs live in `tests/fixtures/packs` and are shared with the
//! integration tests. Only available when compiled with `cfg(test)`.

use crate::host::MemoryRegistry;
use crate::record::IndexedRecord;
use serde_json::json;
use std::path::PathBuf;

/// Directory holding the fixture pack files
#[must_use]
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/packs")
}

/// Registry loaded with every fixture pack
///
/// # Panics
/// Panics if the fixture directory cannot be read.
#[must_use]
pub fn sample_registry() -> MemoryRegistry {
    MemoryRegistry::load_dir(&fixture_dir()).expect("Failed to load fixture packs")
}

/// Minimal well-formed feat record
///
/// # Panics
/// Panics if the generated JSON does not form a record.
#[must_use]
pub fn feat_record(id: &str, name: &str, level: i64, traits: &[&str]) -> IndexedRecord {
    serde_json::from_value(json!({
        "_id": id,
        "name": name,
        "type": "feat",
        "system": {
            "level": { "value": level },
            "category": "general",
            "actionType": { "value": "passive" },
            "traits": { "value": traits, "rarity": "common" },
            "publication": { "title": "Player Core" }
        }
    }))
    .expect("Failed to build feat record")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CollectionRegistry;

    #[test]
    fn test_fixture_packs_load() {
        let registry = sample_registry();
        let ids: Vec<_> = registry
            .collections()
            .into_iter()
            .map(|m| m.collection)
            .collect();
        assert_eq!(
            ids,
            vec![
                "pf2e.actionspf2e",
                "pf2e.pathfinder-bestiary",
                "pf2e.equipment-srd",
                "pf2e.feats-srd",
                "pf2e.pathfinder-hazards",
                "pf2e.spells-srd",
            ]
        );
    }

    #[test]
    fn test_feat_record_has_system_data() {
        let record = feat_record("a", "Alpha", 2, &["general"]);
        assert!(record.has_system_data());
        assert_eq!(record.int_field("system.level.value"), Some(2));
    }
}
