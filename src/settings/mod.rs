//! Persisted browser settings
//!
//! The host's settings store is process-wide state keyed by setting name. The
//! browser only sees it through [`SettingsStore`], wrapped by the typed
//! [`SettingsRepository`]. Two stores ship with the crate:
//!
//! - [`MemorySettings`]: a plain map, for tests and embedding
//! - [`JsonFileSettings`]: a JSON object persisted to a file, used by the CLI

pub mod error;
pub mod types;

pub use error::SettingsError;
pub use types::{PackSetting, PackSettings, SourceSetting, SourcesSettings};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Setting name of the per-tab pack toggles
pub const PACKS_KEY: &str = "compendiumBrowserPacks";

/// Setting name of the source visibility configuration
pub const SOURCES_KEY: &str = "compendiumBrowserSources";

/// Untyped key/value settings storage
pub trait SettingsStore {
    /// Read a raw value
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when the backing storage cannot be read.
    fn get_value(&self, key: &str) -> Result<Option<Value>, SettingsError>;

    /// Write a raw value
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when the backing storage cannot be written.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Settings held in a map
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, Value>,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get_value(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings persisted as one JSON object in a file
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileSettings {
    /// Default location: `<config_dir>/compendium/settings.json`
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoConfigDir` if the config directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let config_dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(config_dir.join("compendium").join("settings.json"))
    }

    /// Open the settings file, starting empty when it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let data = fs::read(&path)?;
            serde_json::from_slice(&data)
                .map_err(|e| SettingsError::serialization(&path.display().to_string(), &e))?
        } else {
            Map::new()
        };
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&self.values)
            .map_err(|e| SettingsError::serialization(&self.path.display().to_string(), &e))?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get_value(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

/// Typed access to the browser's two settings blobs
pub struct SettingsRepository {
    store: Box<dyn SettingsStore>,
}

impl SettingsRepository {
    #[must_use]
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Repository over a fresh in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySettings::new()))
    }

    /// Read the pack toggles, defaulting to empty
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored value cannot be read or parsed.
    pub fn pack_settings(&self) -> Result<PackSettings, SettingsError> {
        self.read(PACKS_KEY)
    }

    /// Persist the pack toggles
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the value cannot be written.
    pub fn save_pack_settings(&mut self, settings: &PackSettings) -> Result<(), SettingsError> {
        self.write(PACKS_KEY, settings)
    }

    /// Read the source configuration, defaulting to show-everything
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored value cannot be read or parsed.
    pub fn sources_settings(&self) -> Result<SourcesSettings, SettingsError> {
        self.read(SOURCES_KEY)
    }

    /// Persist the source configuration
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the value cannot be written.
    pub fn save_sources_settings(&mut self, settings: &SourcesSettings) -> Result<(), SettingsError> {
        self.write(SOURCES_KEY, settings)
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, SettingsError> {
        match self.store.get_value(key)? {
            Some(value) => {
                serde_json::from_value(value).map_err(|e| SettingsError::serialization(key, &e))
            }
            None => Ok(T::default()),
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SettingsError> {
        let value = serde_json::to_value(value).map_err(|e| SettingsError::serialization(key, &e))?;
        self.store.set_value(key, value)
    }
}
