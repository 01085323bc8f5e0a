//! Publication sources and source-based filtering
//!
//! Every record names the book it comes from. The registry keeps the set of
//! known sources with a load toggle each, plus the set discovered while
//! building tab indices, and turns the toggles into a [`SourceFilter`] applied
//! by the pack loader.
//!
//! # Filtering rules
//!
//! - no configured sources: everything passes
//! - privileged user with `ignore_as_gm`: everything passes
//! - otherwise a record passes when its source is empty and empty sources are
//!   shown, when its source is enabled, or when its source is unknown and
//!   unknown sources are shown

pub mod error;

pub use error::SourcesError;

use crate::host::{CollectionMetadata, CollectionRegistry};
use crate::loader::PackLoader;
use crate::record::IndexedRecord;
use crate::search::collate;
use crate::settings::{SettingsRepository, SettingsError, SourceSetting, SourcesSettings};
use heck::ToKebabCase;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Field paths that may carry the source, in precedence order
pub const SOURCE_FIELDS: [&str; 4] = [
    "system.publication.title",
    "system.details.publication.title",
    "system.source.value",
    "system.details.source.value",
];

/// Extract the source display name of a record
///
/// The structured publication title wins over the legacy free-text source
/// field. Returns an empty string when neither is present.
#[must_use]
pub fn source_from_record(record: &IndexedRecord) -> String {
    SOURCE_FIELDS
        .iter()
        .filter_map(|field| record.str_field(field))
        .map(str::trim)
        .find(|source| !source.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Key-safe form of a source name
///
/// # Examples
/// ```
/// # use compendium::sources::source_slug;
/// assert_eq!(source_slug("Pathfinder #145: Hellknight Hill"), "pathfinder-145-hellknight-hill");
/// assert_eq!(source_slug("Advanced Player's Guide"), "advanced-players-guide");
/// ```
#[must_use]
pub fn source_slug(name: &str) -> String {
    name.replace(['\'', '\u{2019}'], "").to_kebab_case()
}

/// Snapshot of the source toggles used while loading
#[derive(Debug, Clone, Default)]
pub struct SourceFilter {
    enabled: HashSet<String>,
    known: HashSet<String>,
    show_empty: bool,
    show_unknown: bool,
    bypass: bool,
}

impl SourceFilter {
    /// Filter that keeps every record
    #[must_use]
    pub fn pass_through() -> Self {
        Self {
            bypass: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_pass_through(&self) -> bool {
        self.bypass
    }

    /// Whether a record survives source filtering
    #[must_use]
    pub fn allows(&self, record: &IndexedRecord) -> bool {
        if self.bypass {
            return true;
        }
        let source = source_from_record(record);
        if source.is_empty() {
            return self.show_empty;
        }
        self.enabled.contains(&source) || (self.show_unknown && !self.known.contains(&source))
    }

    /// Positions of the records that survive
    #[must_use]
    pub fn filter_positions(&self, index: &[IndexedRecord]) -> Vec<usize> {
        index
            .iter()
            .enumerate()
            .filter(|(_, record)| self.allows(record))
            .map(|(position, _)| position)
            .collect()
    }
}

/// A source seen while building tab indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSource {
    pub name: String,
    pub packages: BTreeSet<String>,
}

/// Known and discovered publication sources
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    settings: SourcesSettings,
    discovered: BTreeMap<String, DiscoveredSource>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new(settings: SourcesSettings) -> Self {
        Self {
            settings,
            discovered: BTreeMap::new(),
        }
    }

    /// Registry initialized from persisted settings
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored configuration cannot be read.
    pub fn load(repo: &SettingsRepository) -> Result<Self, SettingsError> {
        Ok(Self::new(repo.sources_settings()?))
    }

    #[must_use]
    pub const fn settings(&self) -> &SourcesSettings {
        &self.settings
    }

    /// Known sources in display order, collated by name
    #[must_use]
    pub fn sorted_sources(&self) -> Vec<(&str, &SourceSetting)> {
        let mut sources: Vec<_> = self
            .settings
            .sources
            .iter()
            .map(|(slug, setting)| (slug.as_str(), setting))
            .collect();
        sources.sort_by(|(_, a), (_, b)| collate(&a.name, &b.name));
        sources
    }

    /// Persist the current configuration
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the settings cannot be written.
    pub fn save(&self, repo: &mut SettingsRepository) -> Result<(), SettingsError> {
        repo.save_sources_settings(&self.settings)
    }

    /// Display names of all sources enabled for loading
    #[must_use]
    pub fn get_sources(&self) -> HashSet<String> {
        self.settings
            .sources
            .values()
            .filter(|source| source.load)
            .map(|source| source.name.clone())
            .collect()
    }

    /// Filter for the current toggles as seen by a user
    #[must_use]
    pub fn source_filter(&self, privileged: bool) -> SourceFilter {
        let enabled = self.get_sources();
        if self.settings.sources.is_empty() || (privileged && self.settings.ignore_as_gm) {
            return SourceFilter::pass_through();
        }
        SourceFilter {
            enabled,
            known: self
                .settings
                .sources
                .values()
                .map(|source| source.name.clone())
                .collect(),
            show_empty: self.settings.show_empty_sources,
            show_unknown: self.settings.show_unknown_sources,
            bypass: false,
        }
    }

    /// Records of an index that survive source filtering
    #[must_use]
    pub fn create_filtered_index<'a>(
        &self,
        index: &'a [IndexedRecord],
        privileged: bool,
    ) -> Vec<&'a IndexedRecord> {
        let filter = self.source_filter(privileged);
        index.iter().filter(|record| filter.allows(record)).collect()
    }

    /// Note a source seen while indexing; returns its slug
    pub fn discover(&mut self, name: &str, package: &str) -> String {
        let slug = source_slug(name);
        let entry = self
            .discovered
            .entry(slug.clone())
            .or_insert_with(|| DiscoveredSource {
                name: name.to_string(),
                packages: BTreeSet::new(),
            });
        if !package.is_empty() {
            entry.packages.insert(package.to_string());
        }
        slug
    }

    #[must_use]
    pub const fn discovered(&self) -> &BTreeMap<String, DiscoveredSource> {
        &self.discovered
    }

    /// Change the load toggle of a known source; `false` when unknown
    pub fn set_source_load(&mut self, slug: &str, load: bool) -> bool {
        match self.settings.sources.get_mut(slug) {
            Some(source) => {
                source.load = load;
                true
            }
            None => false,
        }
    }

    /// Change any of the visibility flags
    pub fn set_flags(
        &mut self,
        ignore_as_gm: Option<bool>,
        show_empty_sources: Option<bool>,
        show_unknown_sources: Option<bool>,
    ) {
        if let Some(value) = ignore_as_gm {
            self.settings.ignore_as_gm = value;
        }
        if let Some(value) = show_empty_sources {
            self.settings.show_empty_sources = value;
        }
        if let Some(value) = show_unknown_sources {
            self.settings.show_unknown_sources = value;
        }
    }

    /// Rescan the source fields of the given collections
    ///
    /// Newly seen sources are registered with `load` set to the current
    /// "show unknown sources" flag. Returns the number of new sources.
    ///
    /// # Errors
    ///
    /// Returns `SourcesError` if an index fetch or the settings write fails.
    pub fn update_sources(
        &mut self,
        loader: &PackLoader,
        registry: &dyn CollectionRegistry,
        collections: &[CollectionMetadata],
        repo: &mut SettingsRepository,
    ) -> Result<usize, SourcesError> {
        let mut added = 0;
        for metadata in collections {
            let index = loader.index(registry, &metadata.collection, &SOURCE_FIELDS)?;
            for record in index.iter() {
                let name = source_from_record(record);
                if name.is_empty() {
                    continue;
                }
                let slug = self.discover(&name, &metadata.package);
                if !self.settings.sources.contains_key(&slug) {
                    self.settings.sources.insert(
                        slug,
                        SourceSetting {
                            load: self.settings.show_unknown_sources,
                            name,
                        },
                    );
                    added += 1;
                }
            }
        }
        tracing::info!(
            added,
            total = self.settings.sources.len(),
            "Rescanned publication sources"
        );
        self.save(repo)?;
        Ok(added)
    }

    /// Forget every known and discovered source, then rescan
    ///
    /// # Errors
    ///
    /// Returns `SourcesError` if the rescan fails.
    pub fn hard_reset(
        &mut self,
        loader: &PackLoader,
        registry: &dyn CollectionRegistry,
        collections: &[CollectionMetadata],
        repo: &mut SettingsRepository,
    ) -> Result<usize, SourcesError> {
        self.settings = SourcesSettings::default();
        self.discovered.clear();
        self.update_sources(loader, registry, collections, repo)
    }
}
