//! Pack index loading
//!
//! [`PackLoader::load_packs`] walks a list of collection ids and yields one
//! [`LoadedPack`] per collection that holds documents of the requested type.
//! Loading is lazy: each call to `next` fetches at most one index, so callers
//! can stop early or interleave their own work.
//!
//! Indices are cached per collection and field list. The cache holds the
//! unfiltered index; source filtering is applied every time a pack is
//! yielded, so changing the source toggles never requires invalidation.
//!
//! The progress reporter advances once per collection and is closed exactly
//! once when the iterator is exhausted.

pub mod error;

pub use error::LoaderError;

use crate::host::{
    CollectionMetadata, CollectionRegistry, Localizer, Notifier, ProgressReporter, keys,
};
use crate::record::{DocumentType, IndexedRecord};
use crate::sources::SourceFilter;
use moka::sync::Cache;
use std::sync::Arc;

/// Cache key: collection id and the sorted list of fetched fields
type IndexKey = (String, Vec<String>);

/// Shared, immutable pack index
pub type PackIndex = Arc<[IndexedRecord]>;

/// Host services a load runs against
pub struct LoadContext<'a> {
    pub registry: &'a dyn CollectionRegistry,
    pub localizer: &'a dyn Localizer,
    pub notifier: &'a dyn Notifier,
    pub progress: &'a mut dyn ProgressReporter,
}

/// One loaded collection with the positions that passed source filtering
#[derive(Debug, Clone)]
pub struct LoadedPack {
    pub metadata: CollectionMetadata,
    pub records: PackIndex,
    pub visible: Vec<usize>,
}

impl LoadedPack {
    /// Records that passed source filtering, in index order
    pub fn iter(&self) -> impl Iterator<Item = &IndexedRecord> {
        self.visible.iter().filter_map(|&position| self.records.get(position))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Index fetcher with a per-collection cache
#[derive(Clone)]
pub struct PackLoader {
    cache: Cache<IndexKey, PackIndex>,
}

impl PackLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Fetch an index through the cache
    ///
    /// # Errors
    ///
    /// Returns `LoaderError` if the host fetch fails.
    pub fn index(
        &self,
        registry: &dyn CollectionRegistry,
        collection: &str,
        fields: &[&str],
    ) -> Result<PackIndex, LoaderError> {
        let mut sorted: Vec<String> = fields.iter().map(ToString::to_string).collect();
        sorted.sort();
        sorted.dedup();
        let key = (collection.to_string(), sorted);

        if let Some(index) = self.cache.get(&key) {
            return Ok(index);
        }

        let index: PackIndex = registry.get_index(collection, fields)?.into();
        tracing::debug!(collection, records = index.len(), "Fetched pack index");
        self.cache.insert(key, Arc::clone(&index));
        Ok(index)
    }

    /// Drop every cached index
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Lazily load the given collections
    #[must_use]
    pub fn load_packs<'a>(
        &'a self,
        ctx: LoadContext<'a>,
        document_type: DocumentType,
        packs: &[String],
        fields: &[&str],
        sources: SourceFilter,
    ) -> LoadPacks<'a> {
        LoadPacks {
            loader: self,
            ctx,
            document_type,
            packs: packs.to_vec(),
            fields: fields.iter().map(ToString::to_string).collect(),
            sources,
            position: 0,
            closed: false,
        }
    }
}

impl Default for PackLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PackLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackLoader")
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

/// Iterator returned by [`PackLoader::load_packs`]
pub struct LoadPacks<'a> {
    loader: &'a PackLoader,
    ctx: LoadContext<'a>,
    document_type: DocumentType,
    packs: Vec<String>,
    fields: Vec<String>,
    sources: SourceFilter,
    position: usize,
    closed: bool,
}

impl LoadPacks<'_> {
    fn load_one(&mut self, collection: &str) -> Option<Result<LoadedPack, LoaderError>> {
        let step = self.position;
        let total = self.packs.len();

        let Some(metadata) = self.ctx.registry.metadata(collection) else {
            tracing::debug!(collection, "Collection not registered");
            self.ctx.progress.advance(step, total, "");
            return None;
        };

        let label = self
            .ctx
            .localizer
            .format(keys::LOADING_PACK, &[("pack", metadata.label.clone())]);
        self.ctx.progress.advance(step, total, &label);

        if metadata.document_type != self.document_type {
            return None;
        }

        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        let records = match self.loader.index(self.ctx.registry, collection, &fields) {
            Ok(records) => records,
            Err(error) => return Some(Err(error)),
        };

        let first = records.first()?;
        if !first.has_system_data() {
            tracing::warn!(collection, "Pack index has no system data");
            let message = self
                .ctx
                .localizer
                .format(keys::PACK_NOT_LOADED, &[("pack", metadata.label.clone())]);
            self.ctx.notifier.warn(&message);
            return None;
        }

        let visible = self.sources.filter_positions(&records);
        Some(Ok(LoadedPack {
            metadata,
            records,
            visible,
        }))
    }
}

impl Iterator for LoadPacks<'_> {
    type Item = Result<LoadedPack, LoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.packs.len() {
            let collection = self.packs[self.position].clone();
            self.position += 1;
            if let Some(loaded) = self.load_one(&collection) {
                return Some(loaded);
            }
        }
        if !self.closed {
            self.closed = true;
            let label = self.ctx.localizer.localize(keys::LOADING_COMPLETE);
            self.ctx.progress.close(&label);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        EnglishLocalizer, HostError, MemoryNotifier, MemoryProgress, MemoryRegistry, ProgressEvent,
    };
    use serde_json::json;

    fn metadata(collection: &str, label: &str, document_type: DocumentType) -> CollectionMetadata {
        CollectionMetadata {
            collection: collection.to_string(),
            label: label.to_string(),
            package: "pf2e".to_string(),
            document_type,
        }
    }

    fn feat(id: &str, source: &str) -> IndexedRecord {
        serde_json::from_value(json!({
            "_id": id,
            "name": id,
            "type": "feat",
            "system": { "level": { "value": 1 }, "publication": { "title": source } }
        }))
        .unwrap()
    }

    fn bare(id: &str) -> IndexedRecord {
        serde_json::from_value(json!({ "_id": id, "name": id, "type": "feat" })).unwrap()
    }

    fn registry() -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        registry.add_pack(
            metadata("pf2e.feats", "Feats", DocumentType::Item),
            vec![feat("a", "Player Core"), feat("b", "Homebrew")],
        );
        registry.add_pack(
            metadata("pf2e.bestiary", "Bestiary", DocumentType::Actor),
            vec![feat("c", "Monster Core")],
        );
        registry.add_pack(metadata("pf2e.empty", "Empty", DocumentType::Item), vec![]);
        registry.add_pack(
            metadata("world.stale", "Stale", DocumentType::Item),
            vec![bare("d")],
        );
        registry
    }

    fn packs(ids: &[&str]) -> Vec<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    const FIELDS: [&str; 2] = ["system.level.value", "system.publication.title"];

    #[test]
    fn test_loads_matching_packs() {
        let registry = registry();
        let notifier = MemoryNotifier::new();
        let mut progress = MemoryProgress::default();
        let loader = PackLoader::new();
        let ctx = LoadContext {
            registry: &registry,
            localizer: &EnglishLocalizer,
            notifier: &notifier,
            progress: &mut progress,
        };

        let loaded: Vec<LoadedPack> = loader
            .load_packs(
                ctx,
                DocumentType::Item,
                &packs(&["pf2e.feats", "pf2e.bestiary", "pf2e.missing", "pf2e.empty", "world.stale"]),
                &FIELDS,
                SourceFilter::pass_through(),
            )
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].metadata.collection, "pf2e.feats");
        assert_eq!(loaded[0].len(), 2);

        let advances = progress
            .events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Advance { .. }))
            .count();
        assert_eq!(advances, 5);
        assert!(progress.events.contains(&ProgressEvent::Advance {
            step: 3,
            total: 5,
            label: String::new(),
        }));
        assert_eq!(
            progress.events.last(),
            Some(&ProgressEvent::Close {
                label: "Loading complete".to_string()
            })
        );

        let warnings = notifier.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"Stale\""));
    }

    #[test]
    fn test_close_happens_once() {
        let registry = registry();
        let notifier = MemoryNotifier::new();
        let mut progress = MemoryProgress::default();
        let loader = PackLoader::new();
        let mut packs_iter = loader.load_packs(
            LoadContext {
                registry: &registry,
                localizer: &EnglishLocalizer,
                notifier: &notifier,
                progress: &mut progress,
            },
            DocumentType::Item,
            &packs(&["pf2e.feats"]),
            &FIELDS,
            SourceFilter::pass_through(),
        );
        assert!(packs_iter.next().is_some());
        assert!(packs_iter.next().is_none());
        assert!(packs_iter.next().is_none());
        drop(packs_iter);

        let closes = progress
            .events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Close { .. }))
            .count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_index_is_cached() {
        let registry = registry();
        let loader = PackLoader::new();

        loader.index(&registry, "pf2e.feats", &FIELDS).unwrap();
        loader
            .index(&registry, "pf2e.feats", &["system.publication.title", "system.level.value"])
            .unwrap();
        assert_eq!(registry.index_fetches(), 1);

        loader.index(&registry, "pf2e.feats", &["system.level.value"]).unwrap();
        assert_eq!(registry.index_fetches(), 2);

        loader.clear_cache();
        loader.index(&registry, "pf2e.feats", &FIELDS).unwrap();
        assert_eq!(registry.index_fetches(), 3);
    }

    #[test]
    fn test_fetch_error_is_yielded() {
        let mut registry = registry();
        registry.fail_collection("pf2e.feats");
        let notifier = MemoryNotifier::new();
        let mut progress = MemoryProgress::default();
        let loader = PackLoader::new();

        let first = loader
            .load_packs(
                LoadContext {
                    registry: &registry,
                    localizer: &EnglishLocalizer,
                    notifier: &notifier,
                    progress: &mut progress,
                },
                DocumentType::Item,
                &packs(&["pf2e.feats"]),
                &FIELDS,
                SourceFilter::pass_through(),
            )
            .next();

        assert!(matches!(
            first,
            Some(Err(LoaderError::Host(HostError::Fetch { .. })))
        ));
    }

    #[test]
    fn test_source_filter_applied_on_yield() {
        use crate::settings::{SourceSetting, SourcesSettings};
        use crate::sources::SourceRegistry;

        let registry = registry();
        let notifier = MemoryNotifier::new();
        let mut progress = MemoryProgress::default();
        let loader = PackLoader::new();
        let mut settings = SourcesSettings {
            show_unknown_sources: false,
            ..SourcesSettings::default()
        };
        settings.sources.insert(
            "player-core".to_string(),
            SourceSetting {
                load: true,
                name: "Player Core".to_string(),
            },
        );
        let sources = SourceRegistry::new(settings);

        let loaded: Vec<LoadedPack> = loader
            .load_packs(
                LoadContext {
                    registry: &registry,
                    localizer: &EnglishLocalizer,
                    notifier: &notifier,
                    progress: &mut progress,
                },
                DocumentType::Item,
                &packs(&["pf2e.feats"]),
                &FIELDS,
                sources.source_filter(false),
            )
            .collect::<Result<_, _>>()
            .unwrap();

        let names: Vec<_> = loaded[0].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
        assert_eq!(loaded[0].records.len(), 2);
    }
}
