//! Interfaces to the host application
//!
//! The browser never talks to the host directly. Document storage,
//! localization, notifications and progress display are reached through the
//! traits in this module so that tests and the command-line front end can plug
//! in their own implementations.
//!
//! # Traits
//!
//! - [`CollectionRegistry`]: enumerable named collections with index and
//!   document fetches
//! - [`Localizer`]: key to string lookup with `{arg}` substitution
//! - [`Notifier`]: transient user-facing messages
//! - [`ProgressReporter`]: progress bar for pack loading

pub mod error;
pub mod memory;

pub use error::HostError;
pub use memory::{
    EnglishLocalizer, LogNotifier, LogProgress, MemoryNotifier, MemoryProgress, MemoryRegistry,
    Notification, NotificationLevel, ProgressEvent,
};

use crate::record::{DocumentType, IndexedRecord};
use serde::{Deserialize, Serialize};

/// Localization keys used by the browser
pub mod keys {
    pub const LOADING_PACK: &str = "CompendiumBrowser.LoadingPack";
    pub const LOADING_COMPLETE: &str = "CompendiumBrowser.LoadingComplete";
    pub const PACK_NOT_LOADED: &str = "CompendiumBrowser.PackNotLoaded";
    pub const MISSING_INDEX_FIELDS: &str = "CompendiumBrowser.MissingIndexFields";
    pub const ROLL_TABLE_TOO_MANY: &str = "CompendiumBrowser.RollTable.TooManyResults";
    pub const ROLL_TABLE_CREATED: &str = "CompendiumBrowser.RollTable.Created";
    pub const ROLL_TABLE_UPDATED: &str = "CompendiumBrowser.RollTable.Updated";
    pub const SOURCES_UPDATED: &str = "CompendiumBrowser.Settings.SourcesUpdated";
}

/// Descriptive data about one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Collection id (`package.name`)
    pub collection: String,
    /// Human-readable label
    pub label: String,
    /// Package the collection ships with
    pub package: String,
    /// Document class stored in the collection
    pub document_type: DocumentType,
}

/// Registry of named content collections
pub trait CollectionRegistry {
    /// Metadata of every known collection, in registration order
    fn collections(&self) -> Vec<CollectionMetadata>;

    /// Metadata of one collection, `None` when unknown
    fn metadata(&self, collection: &str) -> Option<CollectionMetadata>;

    /// Fetch the index of a collection restricted to the given field paths
    ///
    /// # Errors
    ///
    /// Returns `HostError` when the collection is unknown or the fetch fails.
    fn get_index(&self, collection: &str, fields: &[&str]) -> Result<Vec<IndexedRecord>, HostError>;

    /// Fetch one full document
    ///
    /// # Errors
    ///
    /// Returns `HostError` when the fetch fails.
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<IndexedRecord>, HostError>;
}

/// Localization service
pub trait Localizer {
    /// Translate a key; unknown keys come back unchanged
    fn localize(&self, key: &str) -> String;

    /// Translate a key and substitute `{name}` placeholders
    fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        args.iter()
            .fold(self.localize(key), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

/// User-facing notification surface
pub trait Notifier {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Progress display for multi-step loads
pub trait ProgressReporter {
    /// Advance one step and show the label
    fn advance(&mut self, step: usize, total: usize, label: &str);

    /// Close the progress display with a final label
    fn close(&mut self, label: &str);
}
