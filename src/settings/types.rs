//! Persisted settings blobs
//!
//! Both structures round-trip verbatim through the settings store as JSON:
//!
//! ```text
//! compendiumBrowserPacks   { tab: { collection: { load, name, package } } }
//! compendiumBrowserSources { ignoreAsGM, showEmptySources, showUnknownSources,
//!                            sources: { slug: { load, name } } }
//! ```

use crate::tabs::TabName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Load toggle for one collection within one tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSetting {
    pub load: bool,
    pub name: String,
    pub package: String,
}

/// Per-tab map of collection id to its load toggle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackSettings(pub BTreeMap<TabName, BTreeMap<String, PackSetting>>);

impl PackSettings {
    /// Collections enabled for a tab, in collection id order
    #[must_use]
    pub fn loaded_packs(&self, tab: TabName) -> Vec<String> {
        self.0
            .get(&tab)
            .map(|packs| {
                packs
                    .iter()
                    .filter(|(_, setting)| setting.load)
                    .map(|(collection, _)| collection.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Packs registered for a tab
    #[must_use]
    pub fn packs(&self, tab: TabName) -> Option<&BTreeMap<String, PackSetting>> {
        self.0.get(&tab)
    }

    /// Register a pack for a tab, keeping an existing toggle
    pub fn register(&mut self, tab: TabName, collection: &str, name: &str, package: &str) {
        self.0
            .entry(tab)
            .or_default()
            .entry(collection.to_string())
            .or_insert_with(|| PackSetting {
                load: true,
                name: name.to_string(),
                package: package.to_string(),
            });
    }

    /// Change the load toggle of a registered pack
    ///
    /// Returns `false` when the pack is not registered for the tab.
    pub fn set_load(&mut self, tab: TabName, collection: &str, load: bool) -> bool {
        match self.0.get_mut(&tab).and_then(|packs| packs.get_mut(collection)) {
            Some(setting) => {
                setting.load = load;
                true
            }
            None => false,
        }
    }
}

/// Load toggle for one publication source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSetting {
    pub load: bool,
    pub name: String,
}

/// Source visibility configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesSettings {
    /// Game masters see everything regardless of source toggles
    #[serde(rename = "ignoreAsGM")]
    pub ignore_as_gm: bool,
    /// Keep records that name no source
    pub show_empty_sources: bool,
    /// Keep records whose source is not registered
    pub show_unknown_sources: bool,
    /// Known sources keyed by slug
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSetting>,
}

impl Default for SourcesSettings {
    fn default() -> Self {
        Self {
            ignore_as_gm: true,
            show_empty_sources: true,
            show_unknown_sources: true,
            sources: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pack_settings_layout() {
        let mut packs = PackSettings::default();
        packs.register(TabName::Spell, "pf2e.spells-srd", "Spells", "pf2e");

        let value = serde_json::to_value(&packs).unwrap();
        assert_eq!(
            value,
            json!({ "spell": { "pf2e.spells-srd": { "load": true, "name": "Spells", "package": "pf2e" } } })
        );
    }

    #[test]
    fn test_register_keeps_existing_toggle() {
        let mut packs = PackSettings::default();
        packs.register(TabName::Feat, "pf2e.feats-srd", "Feats", "pf2e");
        assert!(packs.set_load(TabName::Feat, "pf2e.feats-srd", false));
        packs.register(TabName::Feat, "pf2e.feats-srd", "Feats", "pf2e");

        assert!(packs.loaded_packs(TabName::Feat).is_empty());
    }

    #[test]
    fn test_set_load_unknown_pack() {
        let mut packs = PackSettings::default();
        assert!(!packs.set_load(TabName::Feat, "missing", true));
    }

    #[test]
    fn test_sources_settings_layout() {
        let mut settings = SourcesSettings::default();
        settings.sources.insert(
            "player-core".to_string(),
            SourceSetting { load: false, name: "Player Core".to_string() },
        );

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            json!({
                "ignoreAsGM": true,
                "showEmptySources": true,
                "showUnknownSources": true,
                "sources": { "player-core": { "load": false, "name": "Player Core" } }
            })
        );
        let back: SourcesSettings = serde_json::from_value(value).unwrap();
        assert_eq!(back, settings);
    }
}
