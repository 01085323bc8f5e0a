//! Browser session
//!
//! [`Browser`] ties the tabs to the host: it owns the host services, the
//! persisted pack and source settings, the shared pack loader and the
//! navigation state, and enforces the rules for opening tabs.
//!
//! # Workflow
//!
//! ```text
//! Browser::new
//!     ↓
//! init_compendium_list ── registers packs per tab, rescans sources
//!     ↓
//! open_tab(name) ── validate → adopt filter → init → show
//!     ↓
//! update_filter / advance_result_limit / view
//!     ↓
//! submit_settings ── persist → reset_initialized_tabs
//! ```

use super::error::BrowserError;
use super::navigation::{ActiveView, Navigation, OpenOptions};
use super::rolltable::{RollTableStore, build_results};
use super::settings_form::SettingsForm;
use crate::config::BrowserConfig;
use crate::filters::{FilterError, FilterState};
use crate::host::{CollectionMetadata, CollectionRegistry, Localizer, Notifier, ProgressReporter, keys};
use crate::loader::PackLoader;
use crate::results::ResultLimit;
use crate::settings::{PackSettings, SettingsRepository};
use crate::sources::SourceRegistry;
use crate::tabs::{SearchEntry, Tab, TabContext, TabName, descriptor_for};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Browser session error type
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Host services the browser runs against
pub struct BrowserServices {
    pub registry: Box<dyn CollectionRegistry>,
    pub localizer: Box<dyn Localizer>,
    pub notifier: Arc<dyn Notifier>,
    pub progress: Box<dyn ProgressReporter>,
    pub roll_tables: Box<dyn RollTableStore>,
    pub settings: SettingsRepository,
}

/// Snapshot of what the browser shows
#[derive(Debug)]
pub struct BrowserView<'a> {
    pub active: Option<ActiveView>,
    pub navigation: &'a [TabName],
    /// Entries matching the filter
    pub total: usize,
    /// Revealed prefix of the sorted matches
    pub results: Vec<&'a SearchEntry>,
}

/// The compendium browser controller
pub struct Browser {
    services: BrowserServices,
    config: BrowserConfig,
    loader: PackLoader,
    pack_settings: PackSettings,
    sources: SourceRegistry,
    tabs: BTreeMap<TabName, Tab>,
    active: Option<ActiveView>,
    navigation: Navigation,
    result_limit: ResultLimit,
    rendered: bool,
}

impl Browser {
    /// Create a browser with one tab per category
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Settings` if the persisted settings cannot be read.
    pub fn new(services: BrowserServices, config: BrowserConfig) -> Result<Self> {
        let pack_settings = services.settings.pack_settings()?;
        let sources = SourceRegistry::load(&services.settings)?;
        let tabs = TabName::ALL
            .into_iter()
            .map(|name| (name, Tab::new(descriptor_for(name), services.localizer.as_ref())))
            .collect();
        let result_limit = ResultLimit::new(config.result_limit_step);

        Ok(Self {
            services,
            config,
            loader: PackLoader::new(),
            pack_settings,
            sources,
            tabs,
            active: None,
            navigation: Navigation::default(),
            result_limit,
            rendered: false,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    #[must_use]
    pub const fn pack_settings(&self) -> &PackSettings {
        &self.pack_settings
    }

    #[must_use]
    pub const fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    #[must_use]
    pub const fn active(&self) -> Option<ActiveView> {
        self.active
    }

    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        self.rendered
    }

    #[must_use]
    pub const fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    #[must_use]
    pub fn roll_tables(&self) -> &dyn RollTableStore {
        self.services.roll_tables.as_ref()
    }

    #[must_use]
    pub fn tab(&self, name: TabName) -> Option<&Tab> {
        self.tabs.get(&name)
    }

    fn is_permitted(&self, name: TabName) -> bool {
        (!name.is_gm_only() || self.config.game_master) && !self.config.is_hidden(name)
    }

    /// Register every collection with the tabs it can feed
    ///
    /// Existing toggles are kept; new packs start enabled. Sources of the
    /// registered collections are rescanned afterwards.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if an index fetch or a settings write fails.
    pub fn init_compendium_list(&mut self) -> Result<()> {
        let registry = self.services.registry.as_ref();
        let mut fed = Vec::new();
        for metadata in registry.collections() {
            let index = self.loader.index(registry, &metadata.collection, &[])?;
            let mut matched = false;
            for tab in self.tabs.values() {
                let descriptor = tab.descriptor();
                let accepts = descriptor.document_type() == metadata.document_type
                    && index
                        .iter()
                        .any(|record| descriptor.record_types().contains(&record.doc_type.as_str()));
                if accepts {
                    self.pack_settings.register(
                        descriptor.name(),
                        &metadata.collection,
                        &metadata.label,
                        &metadata.package,
                    );
                    matched = true;
                }
            }
            if matched {
                fed.push(metadata);
            }
        }
        self.services.settings.save_pack_settings(&self.pack_settings)?;
        tracing::info!(collections = fed.len(), "Compendium list initialized");

        self.sources.update_sources(
            &self.loader,
            registry,
            &fed,
            &mut self.services.settings,
        )?;
        Ok(())
    }

    /// Initialize one tab; `force` rebuilds an initialized one
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Tab` if loading fails.
    pub fn init_tab(&mut self, name: TabName, force: bool) -> Result<bool> {
        let packs = self.pack_settings.loaded_packs(name);
        let Some(tab) = self.tabs.get_mut(&name) else {
            return Err(BrowserError::UnknownTab(name.to_string()));
        };
        let loaded = tab.init(
            TabContext {
                registry: self.services.registry.as_ref(),
                localizer: self.services.localizer.as_ref(),
                notifier: self.services.notifier.as_ref(),
                progress: self.services.progress.as_mut(),
                loader: &self.loader,
                sources: &mut self.sources,
                packs,
                privileged: self.config.game_master,
            },
            force,
        )?;

        if loaded && let Some(sort) = self.config.sort_for(name) {
            if let Err(error) = tab.set_default_sort(&sort.by, sort.direction) {
                tracing::warn!(tab = %name, %error, "Ignoring configured default sort");
            }
        }
        Ok(loaded)
    }

    /// Open a data tab or the `settings` view
    ///
    /// # Errors
    ///
    /// - `UnknownTab` for a name that is neither a data tab nor `settings`
    /// - `GmOnlyTab` for a GM-only tab without game master rights
    /// - `UninitializedTab` when a filter is passed for a tab never initialized
    /// - `Tab` when initialization fails
    pub fn open_tab(&mut self, name: &str, options: OpenOptions) -> Result<()> {
        let permitted: Vec<TabName> = TabName::ALL
            .into_iter()
            .filter(|tab| self.is_permitted(*tab))
            .collect();
        if name == "settings" {
            self.active = Some(ActiveView::Settings);
            self.rendered = true;
            self.navigation
                .apply(None, &options, |tab| permitted.contains(&tab));
            return Ok(());
        }

        let tab_name: TabName = name
            .parse()
            .map_err(|_| BrowserError::UnknownTab(name.to_string()))?;
        if tab_name.is_gm_only() && !self.config.game_master {
            return Err(BrowserError::GmOnlyTab(tab_name));
        }

        if let Some(filter) = options.filter.clone() {
            let tab = self
                .tabs
                .get_mut(&tab_name)
                .ok_or_else(|| BrowserError::UnknownTab(name.to_string()))?;
            if !tab.is_initialized() {
                return Err(BrowserError::UninitializedTab(tab_name));
            }
            tab.set_filter_data(filter)?;
        }

        self.init_tab(tab_name, false)?;
        self.rendered = true;
        self.active = Some(ActiveView::Tab(tab_name));
        self.result_limit.reset();
        self.navigation
            .apply(Some(tab_name), &options, |tab| permitted.contains(&tab));
        Ok(())
    }

    /// Fresh copy of a tab's default filter, initializing the tab first
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Tab` if initialization fails.
    pub fn default_filter(&mut self, name: TabName) -> Result<FilterState> {
        self.init_tab(name, false)?;
        self.tabs
            .get(&name)
            .map(|tab| tab.default_filter_data().clone())
            .ok_or_else(|| BrowserError::UnknownTab(name.to_string()))
    }

    fn active_tab_name(&self) -> Result<TabName> {
        self.active
            .and_then(ActiveView::tab)
            .ok_or(BrowserError::NoActiveTab)
    }

    fn active_tab(&self) -> Result<&Tab> {
        let name = self.active_tab_name()?;
        self.tabs.get(&name).ok_or(BrowserError::NoActiveTab)
    }

    /// Change the active tab's filter; the result window starts over
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTab` without an open data tab, or the error the
    /// update returns.
    pub fn update_filter(
        &mut self,
        update: impl FnOnce(&mut FilterState) -> std::result::Result<(), FilterError>,
    ) -> Result<()> {
        let name = self.active_tab_name()?;
        let tab = self.tabs.get_mut(&name).ok_or(BrowserError::NoActiveTab)?;
        update(tab.filter_data_mut()?)?;
        self.result_limit.reset();
        Ok(())
    }

    /// Reset the active tab's filter to its defaults
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTab` without an open data tab.
    pub fn reset_filters(&mut self) -> Result<()> {
        let name = self.active_tab_name()?;
        if let Some(tab) = self.tabs.get_mut(&name) {
            tab.reset_filters();
        }
        self.result_limit.reset();
        Ok(())
    }

    /// Reveal the next page of results; returns whether more became visible
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTab` without an open data tab.
    pub fn advance_result_limit(&mut self) -> Result<bool> {
        let total = self.active_tab()?.get_index_data().len();
        Ok(self.result_limit.advance(total))
    }

    /// What the browser currently shows
    #[must_use]
    pub fn view(&self) -> BrowserView<'_> {
        let matches = self
            .active_tab()
            .map(Tab::get_index_data)
            .unwrap_or_default();
        let total = matches.len();
        BrowserView {
            active: self.active,
            navigation: self.navigation.visible(),
            total,
            results: self.result_limit.visible(&matches).to_vec(),
        }
    }

    /// Rebuild every initialized tab and clear the active view
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Tab` if a rebuild fails.
    pub fn reset_initialized_tabs(&mut self) -> Result<()> {
        let initialized: Vec<TabName> = self
            .tabs
            .iter()
            .filter(|(_, tab)| tab.is_initialized())
            .map(|(name, _)| *name)
            .collect();
        for name in initialized {
            self.init_tab(name, true)?;
        }
        self.active = None;
        self.result_limit.reset();
        Ok(())
    }

    /// Persist submitted settings and rebuild the initialized tabs
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if persisting or rebuilding fails.
    pub fn submit_settings(&mut self, form: &SettingsForm) -> Result<()> {
        let unmatched = form.apply(&mut self.pack_settings, &mut self.sources);
        if unmatched > 0 {
            tracing::debug!(unmatched, "Settings form contained unknown entries");
        }
        self.services.settings.save_pack_settings(&self.pack_settings)?;
        self.sources.save(&mut self.services.settings)?;
        self.reset_initialized_tabs()
    }

    /// Forget all sources and rescan every collection; returns the number found
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Sources` if the rescan fails.
    pub fn hard_reset_sources(&mut self) -> Result<usize> {
        let registry = self.services.registry.as_ref();
        let collections: Vec<CollectionMetadata> = registry.collections();
        let found = self.sources.hard_reset(
            &self.loader,
            registry,
            &collections,
            &mut self.services.settings,
        )?;
        let message = self
            .services
            .localizer
            .format(keys::SOURCES_UPDATED, &[("count", found.to_string())]);
        self.services.notifier.info(&message);
        Ok(found)
    }

    fn roll_table_results(&self) -> Result<Option<Vec<&SearchEntry>>> {
        let results = self.active_tab()?.get_index_data();
        let max = self.config.roll_table_max_results;
        if results.len() > max {
            let message = self.services.localizer.format(
                keys::ROLL_TABLE_TOO_MANY,
                &[("count", results.len().to_string()), ("max", max.to_string())],
            );
            tracing::warn!(count = results.len(), max, "Roll table too large");
            self.services.notifier.warn(&message);
            return Ok(None);
        }
        Ok(Some(results))
    }

    /// Create a roll table from the full filtered result of the active tab
    ///
    /// Returns `None` when the result exceeds the configured ceiling.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTab` without an open data tab, or `Host` if the store
    /// refuses the table.
    pub fn create_roll_table(&mut self, name: &str) -> Result<Option<String>> {
        let Some(entries) = self.roll_table_results()? else {
            return Ok(None);
        };
        let results = build_results(&entries, 0);
        let count = results.len();
        let id = self.services.roll_tables.create(name, results)?;
        let message = self.services.localizer.format(
            keys::ROLL_TABLE_CREATED,
            &[("name", name.to_string()), ("count", count.to_string())],
        );
        self.services.notifier.info(&message);
        Ok(Some(id))
    }

    /// Append the full filtered result of the active tab to a roll table
    ///
    /// Returns the number of added results, or `None` over the ceiling.
    ///
    /// # Errors
    ///
    /// Returns `Host(TableNotFound)` for an unknown table id.
    pub fn add_to_roll_table(&mut self, table_id: &str) -> Result<Option<usize>> {
        let table = self
            .services
            .roll_tables
            .get(table_id)
            .ok_or_else(|| crate::host::HostError::TableNotFound(table_id.to_string()))?;
        let Some(entries) = self.roll_table_results()? else {
            return Ok(None);
        };
        let results = build_results(&entries, table.max_range());
        let count = results.len();
        self.services.roll_tables.append(table_id, results)?;
        let message = self.services.localizer.format(
            keys::ROLL_TABLE_UPDATED,
            &[("name", table.name), ("count", count.to_string())],
        );
        self.services.notifier.info(&message);
        Ok(Some(count))
    }
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("active", &self.active)
            .field("tabs", &self.tabs)
            .field("result_limit", &self.result_limit)
            .finish_non_exhaustive()
    }
}
