//! Host implementations that live entirely in this process
//!
//! [`MemoryRegistry`] doubles as the pack source of the command-line front end:
//! [`MemoryRegistry::load_dir`] reads one JSON file per pack from a directory.
//! The notifier and progress types come in two flavors, one forwarding to
//! `tracing` and one recording events for inspection.

use super::{keys, CollectionMetadata, CollectionRegistry, HostError, Localizer, Notifier, ProgressReporter};
use crate::record::{DocumentType, IndexedRecord};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A pack held in memory
#[derive(Debug, Clone)]
struct MemoryPack {
    metadata: CollectionMetadata,
    records: Vec<IndexedRecord>,
}

/// On-disk layout of a pack file
#[derive(Debug, Deserialize)]
struct PackFile {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    package: Option<String>,
    #[serde(rename = "type")]
    document_type: DocumentType,
    #[serde(default)]
    documents: Vec<IndexedRecord>,
}

/// Collection registry backed by in-memory packs
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    order: Vec<String>,
    packs: BTreeMap<String, MemoryPack>,
    failing: BTreeSet<String>,
    index_fetches: AtomicUsize,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pack; records get their `collection` set to the pack id
    pub fn add_pack(&mut self, metadata: CollectionMetadata, records: Vec<IndexedRecord>) {
        let collection = metadata.collection.clone();
        let records = records
            .into_iter()
            .map(|mut record| {
                record.collection.clone_from(&collection);
                record
            })
            .collect();
        if !self.packs.contains_key(&collection) {
            self.order.push(collection.clone());
        }
        self.packs.insert(collection, MemoryPack { metadata, records });
    }

    /// Make every fetch from the named collection fail
    pub fn fail_collection(&mut self, collection: impl Into<String>) {
        self.failing.insert(collection.into());
    }

    /// Number of index fetches served so far
    #[must_use]
    pub fn index_fetches(&self) -> usize {
        self.index_fetches.load(Ordering::Relaxed)
    }

    /// Load every `*.json` pack file in a directory
    ///
    /// Files are read in name order. The collection id is
    /// `<package>.<name>`, with the package defaulting to `world`.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Io` when the directory or a file cannot be read and
    /// `HostError::InvalidPack` when a file is not a valid pack.
    pub fn load_dir(dir: &Path) -> Result<Self, HostError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            let data = std::fs::read(&path)?;
            let pack: PackFile = serde_json::from_slice(&data).map_err(|e| HostError::InvalidPack {
                file: path.display().to_string(),
                message: e.to_string(),
            })?;
            let package = pack.package.unwrap_or_else(|| "world".to_string());
            let metadata = CollectionMetadata {
                collection: format!("{package}.{}", pack.name),
                label: pack.label.unwrap_or_else(|| pack.name.clone()),
                package,
                document_type: pack.document_type,
            };
            registry.add_pack(metadata, pack.documents);
        }
        Ok(registry)
    }

    fn pack(&self, collection: &str) -> Result<&MemoryPack, HostError> {
        if self.failing.contains(collection) {
            return Err(HostError::Fetch {
                collection: collection.to_string(),
                message: "collection is unavailable".to_string(),
            });
        }
        self.packs
            .get(collection)
            .ok_or_else(|| HostError::CollectionNotFound(collection.to_string()))
    }
}

impl CollectionRegistry for MemoryRegistry {
    fn collections(&self) -> Vec<CollectionMetadata> {
        self.order
            .iter()
            .filter_map(|id| self.packs.get(id))
            .map(|pack| pack.metadata.clone())
            .collect()
    }

    fn metadata(&self, collection: &str) -> Option<CollectionMetadata> {
        self.packs.get(collection).map(|pack| pack.metadata.clone())
    }

    fn get_index(&self, collection: &str, fields: &[&str]) -> Result<Vec<IndexedRecord>, HostError> {
        let pack = self.pack(collection)?;
        self.index_fetches.fetch_add(1, Ordering::Relaxed);
        Ok(pack.records.iter().map(|record| record.project(fields)).collect())
    }

    fn get_document(&self, collection: &str, id: &str) -> Result<Option<IndexedRecord>, HostError> {
        let pack = self.pack(collection)?;
        Ok(pack.records.iter().find(|record| record.id == id).cloned())
    }
}

/// Built-in English strings for the browser's localization keys
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn localize(&self, key: &str) -> String {
        let text = match key {
            keys::LOADING_PACK => "Loading {pack}",
            keys::LOADING_COMPLETE => "Loading complete",
            keys::PACK_NOT_LOADED => {
                "The index of compendium \"{pack}\" has no system data and was skipped. \
                 Consider disabling it in the compendium browser settings."
            }
            keys::MISSING_INDEX_FIELDS => {
                "{count} entries of compendium \"{pack}\" are missing required data and were \
                 skipped. Consider disabling it in the compendium browser settings."
            }
            keys::ROLL_TABLE_TOO_MANY => {
                "The current result has {count} entries, more than the maximum of {max} \
                 allowed for a roll table."
            }
            keys::ROLL_TABLE_CREATED => "Roll table \"{name}\" created with {count} results.",
            keys::ROLL_TABLE_UPDATED => "Added {count} results to roll table \"{name}\".",
            keys::SOURCES_UPDATED => "Found {count} publication sources.",
            other => other,
        };
        text.to_string()
    }
}

/// Severity of a recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warn,
}

/// A recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Notifier that forwards messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Notifier that records every message
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notifications so far
    #[must_use]
    pub fn messages(&self) -> Vec<Notification> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at warning level
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Warn)
            .map(|n| n.message)
            .collect()
    }

    fn push(&self, level: NotificationLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(Notification {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl Notifier for MemoryNotifier {
    fn info(&self, message: &str) {
        self.push(NotificationLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(NotificationLevel::Warn, message);
    }
}

/// Progress reporter that logs each step at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn advance(&mut self, step: usize, total: usize, label: &str) {
        tracing::debug!(step, total, "{label}");
    }

    fn close(&mut self, label: &str) {
        tracing::debug!("{label}");
    }
}

/// A recorded progress event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Advance { step: usize, total: usize, label: String },
    Close { label: String },
}

/// Progress reporter that records every event
#[derive(Debug, Default)]
pub struct MemoryProgress {
    pub events: Vec<ProgressEvent>,
}

impl ProgressReporter for MemoryProgress {
    fn advance(&mut self, step: usize, total: usize, label: &str) {
        self.events.push(ProgressEvent::Advance {
            step,
            total,
            label: label.to_string(),
        });
    }

    fn close(&mut self, label: &str) {
        self.events.push(ProgressEvent::Close {
            label: label.to_string(),
        });
    }
}
