//! Integration tests for the compendium browser
//!
//! These tests drive the public browser API end to end over the fixture packs
//! in `tests/fixtures/packs` and over generated packs.

use compendium::browse::{
    ActiveView, Browser, BrowserError, BrowserServices, MemoryRollTables, OpenOptions,
    SettingsForm, SpellEntryKind, SpellTabOptions,
};
use compendium::config::BrowserConfig;
use compendium::filters::{FilterState, SortOrder};
use compendium::host::{
    CollectionMetadata, EnglishLocalizer, MemoryNotifier, MemoryProgress, MemoryRegistry,
};
use compendium::record::{DocumentType, IndexedRecord};
use compendium::settings::{JsonFileSettings, PackSettings, SettingsRepository};
use compendium::tabs::TabName;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture_registry() -> MemoryRegistry {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/packs");
    MemoryRegistry::load_dir(&dir).unwrap()
}

fn services(
    registry: MemoryRegistry,
    settings: SettingsRepository,
    notifier: &Arc<MemoryNotifier>,
) -> BrowserServices {
    BrowserServices {
        registry: Box::new(registry),
        localizer: Box::new(EnglishLocalizer),
        notifier: notifier.clone(),
        progress: Box::new(MemoryProgress::default()),
        roll_tables: Box::new(MemoryRollTables::new()),
        settings,
    }
}

fn config(game_master: bool) -> BrowserConfig {
    BrowserConfig {
        game_master,
        ..BrowserConfig::default()
    }
}

/// Browser over a registry with the compendium list initialized
fn setup_browser(registry: MemoryRegistry, game_master: bool) -> (Browser, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let mut browser = Browser::new(
        services(registry, SettingsRepository::in_memory(), &notifier),
        config(game_master),
    )
    .unwrap();
    browser.init_compendium_list().unwrap();
    (browser, notifier)
}

fn result_names(browser: &Browser) -> Vec<String> {
    browser
        .view()
        .results
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}

fn generated_feats(count: usize) -> MemoryRegistry {
    let records: Vec<IndexedRecord> = (0..count)
        .map(|n| {
            serde_json::from_value(json!({
                "_id": format!("feat-{n}"),
                "name": format!("Generated Feat {n}"),
                "type": "feat",
                "system": {
                    "level": { "value": n % 20 },
                    "category": "general",
                    "actionType": { "value": "passive" },
                    "traits": { "value": ["general"], "rarity": "common" },
                    "publication": { "title": "Player Core" }
                }
            }))
            .unwrap()
        })
        .collect();
    let mut registry = MemoryRegistry::new();
    registry.add_pack(
        CollectionMetadata {
            collection: "world.generated-feats".to_string(),
            label: "Generated Feats".to_string(),
            package: "world".to_string(),
            document_type: DocumentType::Item,
        },
        records,
    );
    registry
}

#[test]
fn test_feats_drop_records_missing_fields() {
    let (mut browser, notifier) = setup_browser(fixture_registry(), false);
    browser.open_tab("feat", OpenOptions::default()).unwrap();

    assert_eq!(
        result_names(&browser),
        vec!["Nimble Elf", "Power Attack", "Toughness"]
    );
    let warnings = notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("1 entries"));
    assert!(warnings[0].contains("Feats"));
}

#[test]
fn test_comma_clauses_must_all_match() {
    let (mut browser, _) = setup_browser(fixture_registry(), false);
    browser.open_tab("spell", OpenOptions::default()).unwrap();
    browser
        .update_filter(|filter| {
            filter.set_search("fire, bolt");
            Ok(())
        })
        .unwrap();
    assert_eq!(result_names(&browser), vec!["Fire Bolt"]);
}

#[test]
fn test_single_character_query_matches_everything() {
    let (mut browser, _) = setup_browser(fixture_registry(), false);
    browser.open_tab("spell", OpenOptions::default()).unwrap();
    let total = browser.view().total;
    assert_eq!(total, 7);

    browser
        .update_filter(|filter| {
            filter.set_search("f");
            Ok(())
        })
        .unwrap();
    assert_eq!(browser.view().total, total);
}

#[test]
fn test_no_known_sources_fails_open() {
    let mut packs = PackSettings::default();
    packs.register(TabName::Spell, "pf2e.spells-srd", "Spells", "pf2e");
    let mut settings = SettingsRepository::in_memory();
    settings.save_pack_settings(&packs).unwrap();

    let notifier = Arc::new(MemoryNotifier::new());
    let mut browser =
        Browser::new(services(fixture_registry(), settings, &notifier), config(false)).unwrap();
    assert!(browser.sources().get_sources().is_empty());

    browser.open_tab("spell", OpenOptions::default()).unwrap();
    assert_eq!(browser.view().total, 7);
}

#[test]
fn test_disabled_source_hidden_unless_gm() {
    let disable = SettingsForm {
        sources: vec![("homebrew-grimoire".to_string(), false)],
        ..SettingsForm::default()
    };

    let (mut player, _) = setup_browser(fixture_registry(), false);
    player.submit_settings(&disable).unwrap();
    player.open_tab("spell", OpenOptions::default()).unwrap();
    let names = result_names(&player);
    assert_eq!(names.len(), 6);
    assert!(!names.contains(&"Fire Bolt".to_string()));

    let (mut gm, _) = setup_browser(fixture_registry(), true);
    gm.submit_settings(&disable).unwrap();
    gm.open_tab("spell", OpenOptions::default()).unwrap();
    assert!(result_names(&gm).contains(&"Fire Bolt".to_string()));
}

#[test]
fn test_gm_only_tab_requires_rights() {
    let (mut browser, _) = setup_browser(fixture_registry(), false);
    let error = browser
        .open_tab("hazard", OpenOptions::default())
        .unwrap_err();
    assert!(matches!(error, BrowserError::GmOnlyTab(TabName::Hazard)));
    assert!(browser.active().is_none());

    let (mut gm, _) = setup_browser(fixture_registry(), true);
    gm.open_tab("hazard", OpenOptions::default()).unwrap();
    assert_eq!(result_names(&gm), vec!["Hidden Pit", "Spinning Blade Pillar"]);
}

#[test]
fn test_filter_on_uninitialized_tab() {
    let (mut browser, _) = setup_browser(fixture_registry(), false);
    let filter = FilterState::new(SortOrder::new(Vec::new()));
    let error = browser
        .open_tab("spell", OpenOptions::with_filter(filter))
        .unwrap_err();
    assert!(matches!(error, BrowserError::UninitializedTab(TabName::Spell)));
    assert!(!browser.tab(TabName::Spell).unwrap().is_initialized());
}

#[test]
fn test_open_spell_tab_for_prepared_caster() {
    let (mut browser, _) = setup_browser(fixture_registry(), false);
    browser
        .open_spell_tab(&SpellTabOptions {
            tradition: Some("arcane".to_string()),
            max_rank: Some(3),
            entry_kind: Some(SpellEntryKind::Prepared),
            ..SpellTabOptions::default()
        })
        .unwrap();

    assert_eq!(browser.active(), Some(ActiveView::Tab(TabName::Spell)));
    assert_eq!(
        result_names(&browser),
        vec!["Electric Arc", "Fire Bolt", "Fireball", "Lightning Bolt"]
    );
}

#[test]
fn test_open_spell_tab_for_focus_entry() {
    let (mut browser, _) = setup_browser(fixture_registry(), false);
    browser
        .open_spell_tab(&SpellTabOptions {
            tradition: Some("divine".to_string()),
            entry_kind: Some(SpellEntryKind::Focus),
            ..SpellTabOptions::default()
        })
        .unwrap();
    assert_eq!(result_names(&browser), vec!["Lay on Hands"]);
}

#[test]
fn test_roll_table_ceiling() {
    let (mut browser, notifier) = setup_browser(generated_feats(1001), false);
    browser.open_tab("feat", OpenOptions::default()).unwrap();
    assert_eq!(browser.view().total, 1001);

    assert_eq!(browser.create_roll_table("Too Many").unwrap(), None);
    let warning = notifier.warnings().pop().unwrap();
    assert!(warning.contains("1001"));
    assert!(warning.contains("1000"));
    assert!(browser.roll_tables().get("table-1").is_none());
}

#[test]
fn test_roll_table_at_ceiling() {
    let (mut browser, _) = setup_browser(generated_feats(1000), false);
    browser.open_tab("feat", OpenOptions::default()).unwrap();

    let id = browser.create_roll_table("Feats").unwrap().unwrap();
    let table = browser.roll_tables().get(&id).unwrap();
    assert_eq!(table.results.len(), 1000);
    assert_eq!(table.results[0].range, [1, 1]);
    assert_eq!(table.max_range(), 1000);
    assert_eq!(table.formula, "1d1000");
}

#[test]
fn test_result_window_grows_by_step() {
    let (mut browser, _) = setup_browser(generated_feats(250), false);
    browser.open_tab("feat", OpenOptions::default()).unwrap();
    assert_eq!(browser.view().results.len(), 100);

    assert!(browser.advance_result_limit().unwrap());
    assert!(browser.advance_result_limit().unwrap());
    assert_eq!(browser.view().results.len(), 250);
    assert!(!browser.advance_result_limit().unwrap());

    browser
        .update_filter(|filter| {
            filter.set_search("generated");
            Ok(())
        })
        .unwrap();
    assert_eq!(browser.view().results.len(), 100);
}

#[test]
fn test_submit_settings_persists_and_rebuilds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let notifier = Arc::new(MemoryNotifier::new());
    let settings = SettingsRepository::new(Box::new(JsonFileSettings::open(&path).unwrap()));
    let mut browser =
        Browser::new(services(fixture_registry(), settings, &notifier), config(false)).unwrap();
    browser.init_compendium_list().unwrap();
    browser.open_tab("feat", OpenOptions::default()).unwrap();
    assert_eq!(browser.view().total, 3);

    let form = SettingsForm {
        packs: vec![(TabName::Feat, "pf2e.feats-srd".to_string(), false)],
        show_empty_sources: Some(false),
        ..SettingsForm::default()
    };
    browser.submit_settings(&form).unwrap();

    assert!(browser.active().is_none());
    let feats = browser.tab(TabName::Feat).unwrap();
    assert!(feats.is_initialized());
    assert!(feats.entries().is_empty());

    let reopened = SettingsRepository::new(Box::new(JsonFileSettings::open(&path).unwrap()));
    assert!(reopened.pack_settings().unwrap().loaded_packs(TabName::Feat).is_empty());
    let sources = reopened.sources_settings().unwrap();
    assert!(!sources.show_empty_sources);
    assert!(sources.sources.contains_key("player-core"));
}

#[test]
fn test_hard_reset_rediscovers_sources() {
    let (mut browser, notifier) = setup_browser(fixture_registry(), false);
    let before = browser.sources().get_sources();

    let found = browser.hard_reset_sources().unwrap();
    assert_eq!(found, before.len());
    assert_eq!(browser.sources().get_sources(), before);
    assert!(
        notifier
            .messages()
            .iter()
            .any(|n| n.message == format!("Found {found} publication sources."))
    );
}
