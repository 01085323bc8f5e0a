//! Category tabs
//!
//! Every content category is served by one generic [`Tab`] parameterized by a
//! [`TabDescriptor`]. The descriptor names the record types and index fields
//! it needs, turns a record into facets, and builds the tab's default filter.
//! Everything else (loading, dropping broken records, source discovery,
//! option population, full-text indexing, filtering and sorting) lives here
//! and is shared.

pub mod action;
pub mod bestiary;
pub mod entry;
pub mod equipment;
pub mod error;
pub mod feat;
pub mod hazard;
pub mod name;
pub mod shape;
pub mod spell;
pub mod tables;

pub use entry::{FacetValue, SearchEntry};
pub use error::{ExtractError, TabError};
pub use name::{TabName, UnknownTabName};
pub use tables::OptionTable;

use crate::filters::{FilterEngine, FilterOption, FilterState, SortDirection};
use crate::host::{CollectionRegistry, Localizer, Notifier, ProgressReporter, keys};
use crate::loader::{LoadContext, PackLoader};
use crate::record::{DocumentType, IndexedRecord};
use crate::results::sort_result;
use crate::search::SearchIndex;
use crate::sources::{SourceRegistry, source_from_record};
use heck::ToTitleCase;
use std::collections::{BTreeMap, BTreeSet};

/// Facet key every tab uses for the publication source slug
pub const SOURCE_FACET: &str = "source";

/// Per-category strategy plugged into a [`Tab`]
pub trait TabDescriptor: Send + Sync {
    fn name(&self) -> TabName;

    fn document_type(&self) -> DocumentType;

    /// Record `type` tags the tab accepts
    fn record_types(&self) -> &'static [&'static str];

    /// Field paths fetched with the index; all are required unless exempt
    fn index_fields(&self) -> &'static [&'static str];

    /// Fields that may be absent without dropping the record
    fn optional_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the untranslated name is indexed for full-text search
    fn search_original_name(&self) -> bool {
        true
    }

    /// Derive the category facets of one record
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` when the record data does not fit the
    /// category's shape.
    fn extract(&self, record: &IndexedRecord, entry: &mut SearchEntry) -> Result<(), ExtractError>;

    /// Filter state before options are known
    fn default_filter(&self, localizer: &dyn Localizer) -> FilterState;

    /// Static option table for a facet, if it has one
    fn option_table(&self, _facet: &str) -> Option<OptionTable> {
        None
    }

    /// Fill filter options from what the load discovered
    fn populate_options(
        &self,
        filter: &mut FilterState,
        discovered: &DiscoveredFacets,
        localizer: &dyn Localizer,
    ) {
        populate_options(self, filter, discovered, localizer);
    }
}

/// Facet values and sources seen while building a tab
#[derive(Debug, Clone, Default)]
pub struct DiscoveredFacets {
    values: BTreeMap<String, BTreeSet<String>>,
    bounds: BTreeMap<String, (i64, i64)>,
    sources: BTreeMap<String, String>,
}

impl DiscoveredFacets {
    /// Record every facet value of an entry
    pub fn record(&mut self, entry: &SearchEntry) {
        for (key, value) in &entry.facets {
            if let Some(number) = value.as_number() {
                self.bounds
                    .entry(key.clone())
                    .and_modify(|(low, high)| {
                        *low = (*low).min(number);
                        *high = (*high).max(number);
                    })
                    .or_insert((number, number));
            }
            self.values.entry(key.clone()).or_default().extend(value.keys());
        }
    }

    pub fn add_source(&mut self, slug: String, name: String) {
        self.sources.entry(slug).or_insert(name);
    }

    #[must_use]
    pub fn contains(&self, facet: &str, value: &str) -> bool {
        self.values.get(facet).is_some_and(|values| values.contains(value))
    }

    /// Distinct values of a facet in key order
    pub fn values(&self, facet: &str) -> impl Iterator<Item = &str> {
        self.values.get(facet).into_iter().flatten().map(String::as_str)
    }

    /// Smallest and largest number seen for a numeric facet
    #[must_use]
    pub fn bounds(&self, facet: &str) -> Option<(i64, i64)> {
        self.bounds.get(facet).copied()
    }

    /// Discovered sources, slug to display name
    #[must_use]
    pub const fn sources(&self) -> &BTreeMap<String, String> {
        &self.sources
    }
}

/// Options for one facet: static table entries that occur in the data,
/// discovered sources, or the discovered values themselves
fn facet_options<D: TabDescriptor + ?Sized>(
    descriptor: &D,
    facet: &str,
    discovered: &DiscoveredFacets,
    localizer: &dyn Localizer,
) -> (Vec<FilterOption>, bool) {
    if facet == SOURCE_FACET {
        let options = discovered
            .sources()
            .iter()
            .map(|(slug, name)| FilterOption::new(slug.clone(), name.clone()))
            .collect();
        return (options, false);
    }
    match descriptor.option_table(facet) {
        Some(table) => {
            let options = table
                .entries
                .iter()
                .filter(|(value, _)| discovered.contains(facet, value))
                .map(|(value, label)| FilterOption::new(*value, localizer.localize(label)))
                .collect();
            (options, table.keep_order)
        }
        None => {
            let options = discovered
                .values(facet)
                .map(|value| FilterOption::new(value, value.to_title_case()))
                .collect();
            (options, false)
        }
    }
}

/// Default option population shared by all descriptors
pub fn populate_options<D: TabDescriptor + ?Sized>(
    descriptor: &D,
    filter: &mut FilterState,
    discovered: &DiscoveredFacets,
    localizer: &dyn Localizer,
) {
    for group in filter.checkboxes.values_mut() {
        let (options, keep_order) = facet_options(descriptor, &group.facet, discovered, localizer);
        group.set_options(options, keep_order);
    }
    for group in filter.multiselects.values_mut() {
        let (options, _) = facet_options(descriptor, &group.facet, discovered, localizer);
        group.set_options(options);
    }
    for select in filter.selects.values_mut() {
        let (options, _) = facet_options(descriptor, &select.facet, discovered, localizer);
        select.options = options;
    }
}

/// First required field the record lacks
///
/// Publication and source paths are legacy duplicates of each other and never
/// required.
fn missing_field<'f>(
    record: &IndexedRecord,
    fields: &[&'f str],
    optional: &[&str],
) -> Option<&'f str> {
    fields
        .iter()
        .copied()
        .filter(|field| !field.contains(".source") && !field.contains(".publication"))
        .filter(|field| !optional.contains(field))
        .find(|field| !record.has_field(field))
}

/// Everything a tab needs to (re)build its index
pub struct TabContext<'a> {
    pub registry: &'a dyn CollectionRegistry,
    pub localizer: &'a dyn Localizer,
    pub notifier: &'a dyn Notifier,
    pub progress: &'a mut dyn ProgressReporter,
    pub loader: &'a PackLoader,
    pub sources: &'a mut SourceRegistry,
    /// Enabled collections of this tab
    pub packs: Vec<String>,
    pub privileged: bool,
}

/// One content category: entries, full-text index and filter state
pub struct Tab {
    descriptor: Box<dyn TabDescriptor>,
    entries: Vec<SearchEntry>,
    index: SearchIndex,
    filter_data: FilterState,
    default_filter_data: FilterState,
    is_initialized: bool,
}

impl Tab {
    #[must_use]
    pub fn new(descriptor: Box<dyn TabDescriptor>, localizer: &dyn Localizer) -> Self {
        let filter = descriptor.default_filter(localizer);
        Self {
            descriptor,
            entries: Vec::new(),
            index: SearchIndex::new(),
            default_filter_data: filter.clone(),
            filter_data: filter,
            is_initialized: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> TabName {
        self.descriptor.name()
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    #[must_use]
    pub fn descriptor(&self) -> &dyn TabDescriptor {
        self.descriptor.as_ref()
    }

    #[must_use]
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Build the index unless already built; `force` rebuilds
    ///
    /// Returns whether a load happened.
    ///
    /// # Errors
    ///
    /// Returns `TabError::Loader` if a pack index cannot be fetched. The tab
    /// stays uninitialized in that case.
    pub fn init(&mut self, ctx: TabContext<'_>, force: bool) -> Result<bool, TabError> {
        if self.is_initialized && !force {
            return Ok(false);
        }
        self.load_data(ctx)?;
        self.is_initialized = true;
        Ok(true)
    }

    /// Rebuild entries, full-text index and filter options from the packs
    ///
    /// # Errors
    ///
    /// Returns `TabError::Loader` if a pack index cannot be fetched.
    pub fn load_data(&mut self, ctx: TabContext<'_>) -> Result<(), TabError> {
        let TabContext {
            registry,
            localizer,
            notifier,
            progress,
            loader,
            sources,
            packs,
            privileged,
        } = ctx;
        let descriptor = self.descriptor.as_ref();
        let source_filter = sources.source_filter(privileged);
        let load = LoadContext {
            registry,
            localizer,
            notifier,
            progress,
        };

        let mut entries = Vec::new();
        let mut discovered = DiscoveredFacets::default();
        let loaded = loader.load_packs(
            load,
            descriptor.document_type(),
            &packs,
            descriptor.index_fields(),
            source_filter,
        );
        for pack in loaded {
            let pack = pack?;
            let mut dropped = 0usize;
            for record in pack.iter() {
                if !descriptor.record_types().contains(&record.doc_type.as_str()) {
                    continue;
                }
                if let Some(field) =
                    missing_field(record, descriptor.index_fields(), descriptor.optional_fields())
                {
                    tracing::warn!(
                        pack = %pack.metadata.collection,
                        record = %record.id,
                        field,
                        "Dropping record with missing index field"
                    );
                    dropped += 1;
                    continue;
                }

                let mut entry = SearchEntry::from_record(record, descriptor.document_type());
                if let Err(error) = descriptor.extract(record, &mut entry) {
                    tracing::warn!(
                        pack = %pack.metadata.collection,
                        record = %record.id,
                        %error,
                        "Dropping record with unexpected data"
                    );
                    dropped += 1;
                    continue;
                }

                let source = source_from_record(record);
                if !source.is_empty() {
                    let slug = sources.discover(&source, &pack.metadata.package);
                    entry.set_text(SOURCE_FACET, slug.clone());
                    discovered.add_source(slug, source);
                }
                discovered.record(&entry);
                entries.push(entry);
            }

            if dropped > 0 {
                let message = localizer.format(
                    keys::MISSING_INDEX_FIELDS,
                    &[
                        ("count", dropped.to_string()),
                        ("pack", pack.metadata.label.clone()),
                    ],
                );
                notifier.warn(&message);
            }
        }

        let mut index = SearchIndex::new();
        for (position, entry) in entries.iter().enumerate() {
            index.add(position, &entry.name);
            if descriptor.search_original_name()
                && let Some(original) = &entry.original_name
            {
                index.add(position, original);
            }
        }

        let mut filter = descriptor.default_filter(localizer);
        descriptor.populate_options(&mut filter, &discovered, localizer);
        filter.order = self.default_filter_data.order.clone();

        tracing::debug!(
            tab = %descriptor.name(),
            entries = entries.len(),
            terms = index.term_count(),
            "Tab index built"
        );

        self.entries = entries;
        self.index = index;
        self.default_filter_data = filter.clone();
        self.filter_data = filter;
        Ok(())
    }

    /// Current filter state
    ///
    /// # Errors
    ///
    /// Returns `TabError::Uninitialized` before the first `init`.
    pub fn get_filter_data(&self) -> Result<&FilterState, TabError> {
        if !self.is_initialized {
            return Err(TabError::Uninitialized(self.name()));
        }
        Ok(&self.filter_data)
    }

    /// Mutable filter state
    ///
    /// # Errors
    ///
    /// Returns `TabError::Uninitialized` before the first `init`.
    pub fn filter_data_mut(&mut self) -> Result<&mut FilterState, TabError> {
        if !self.is_initialized {
            return Err(TabError::Uninitialized(self.name()));
        }
        Ok(&mut self.filter_data)
    }

    /// Replace the filter state
    ///
    /// # Errors
    ///
    /// Returns `TabError::Uninitialized` before the first `init`.
    pub fn set_filter_data(&mut self, filter: FilterState) -> Result<(), TabError> {
        *self.filter_data_mut()? = filter;
        Ok(())
    }

    /// Filter state the tab was initialized with
    #[must_use]
    pub const fn default_filter_data(&self) -> &FilterState {
        &self.default_filter_data
    }

    /// Back to the filter state the tab was initialized with
    pub fn reset_filters(&mut self) {
        self.filter_data = self.default_filter_data.clone();
    }

    /// Configure the default sort, applied to the current filter as well
    ///
    /// # Errors
    ///
    /// Returns `TabError::Filter` if the tab offers no such sort key.
    pub fn set_default_sort(&mut self, by: &str, direction: SortDirection) -> Result<(), TabError> {
        self.default_filter_data.set_order(by, direction)?;
        self.filter_data.set_order(by, direction)?;
        Ok(())
    }

    /// Entries passing the current filter, sorted
    #[must_use]
    pub fn get_index_data(&self) -> Vec<&SearchEntry> {
        let engine = FilterEngine::new(&self.filter_data, &self.index);
        let mut results: Vec<&SearchEntry> = engine
            .apply(&self.entries)
            .into_iter()
            .filter_map(|position| self.entries.get(position))
            .collect();
        sort_result(&mut results, &self.filter_data.order);
        results
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("name", &self.name())
            .field("entries", &self.entries.len())
            .field("is_initialized", &self.is_initialized)
            .finish_non_exhaustive()
    }
}

/// Descriptor for a tab name
#[must_use]
pub fn descriptor_for(name: TabName) -> Box<dyn TabDescriptor> {
    match name {
        TabName::Action => Box::new(action::ActionTab),
        TabName::Bestiary => Box::new(bestiary::BestiaryTab),
        TabName::Equipment => Box::new(equipment::EquipmentTab),
        TabName::Feat => Box::new(feat::FeatTab),
        TabName::Hazard => Box::new(hazard::HazardTab),
        TabName::Spell => Box::new(spell::SpellTab),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EnglishLocalizer, MemoryNotifier, MemoryProgress};
    use crate::testing::{feat_record, sample_registry};

    fn init_feats(tab: &mut Tab, notifier: &MemoryNotifier, sources: &mut SourceRegistry) {
        let registry = sample_registry();
        let loader = PackLoader::new();
        let mut progress = MemoryProgress::default();
        tab.init(
            TabContext {
                registry: &registry,
                localizer: &EnglishLocalizer,
                notifier,
                progress: &mut progress,
                loader: &loader,
                sources,
                packs: vec!["pf2e.feats-srd".to_string()],
                privileged: true,
            },
            false,
        )
        .unwrap();
    }

    #[test]
    fn test_uninitialized_filter_access() {
        let tab = Tab::new(descriptor_for(TabName::Feat), &EnglishLocalizer);
        assert!(matches!(
            tab.get_filter_data(),
            Err(TabError::Uninitialized(TabName::Feat))
        ));
    }

    #[test]
    fn test_init_builds_entries_and_drops_broken_records() {
        let mut tab = Tab::new(descriptor_for(TabName::Feat), &EnglishLocalizer);
        let notifier = MemoryNotifier::new();
        let mut sources = SourceRegistry::default();
        init_feats(&mut tab, &notifier, &mut sources);

        assert!(tab.is_initialized());
        let names: Vec<_> = tab.entries().iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"Power Attack"));
        assert!(!names.contains(&"Broken Feat"));

        let warnings = notifier.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"Feats\""));
        assert!(warnings[0].starts_with('1'));

        assert!(sources.discovered().contains_key("player-core"));
    }

    #[test]
    fn test_options_come_from_discovered_values() {
        let mut tab = Tab::new(descriptor_for(TabName::Feat), &EnglishLocalizer);
        let notifier = MemoryNotifier::new();
        let mut sources = SourceRegistry::default();
        init_feats(&mut tab, &notifier, &mut sources);

        let filter = tab.get_filter_data().unwrap();
        let classes: Vec<_> = filter.checkboxes["class"]
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(classes, vec!["fighter"]);

        let sources: Vec<_> = filter.checkboxes["source"]
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(sources, vec!["Player Core"]);
    }

    #[test]
    fn test_search_and_reset() {
        let mut tab = Tab::new(descriptor_for(TabName::Feat), &EnglishLocalizer);
        let notifier = MemoryNotifier::new();
        let mut sources = SourceRegistry::default();
        init_feats(&mut tab, &notifier, &mut sources);

        let total = tab.get_index_data().len();
        tab.filter_data_mut().unwrap().set_search("power");
        let names: Vec<_> = tab.get_index_data().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["Power Attack"]);

        tab.reset_filters();
        assert_eq!(tab.get_index_data().len(), total);
    }

    #[test]
    fn test_init_is_idempotent_unless_forced() {
        let mut tab = Tab::new(descriptor_for(TabName::Feat), &EnglishLocalizer);
        let notifier = MemoryNotifier::new();
        let mut sources = SourceRegistry::default();
        init_feats(&mut tab, &notifier, &mut sources);

        let registry = sample_registry();
        let loader = PackLoader::new();
        let mut progress = MemoryProgress::default();
        let reloaded = tab
            .init(
                TabContext {
                    registry: &registry,
                    localizer: &EnglishLocalizer,
                    notifier: &notifier,
                    progress: &mut progress,
                    loader: &loader,
                    sources: &mut sources,
                    packs: Vec::new(),
                    privileged: true,
                },
                false,
            )
            .unwrap();
        assert!(!reloaded);
        assert!(!tab.entries().is_empty());
    }

    #[test]
    fn test_missing_field_exemptions() {
        let record = feat_record("x", "Test", 1, &[]);
        let fields = [
            "system.level.value",
            "system.publication.title",
            "system.source.value",
            "system.actions.value",
        ];
        assert_eq!(missing_field(&record, &fields, &["system.actions.value"]), None);
        assert_eq!(
            missing_field(&record, &fields, &[]),
            Some("system.actions.value")
        );
    }

    #[test]
    fn test_discovered_bounds() {
        let mut discovered = DiscoveredFacets::default();
        let record = feat_record("a", "A", 4, &[]);
        let mut entry = SearchEntry::from_record(&record, DocumentType::Item);
        entry.set_number("level", 4);
        discovered.record(&entry);
        entry.set_number("level", -1);
        discovered.record(&entry);
        assert_eq!(discovered.bounds("level"), Some((-1, 4)));
        assert!(discovered.contains("level", "-1"));
    }
}
