//! Configuration module for compendium
//!
//! Manages application configuration: where packs and persisted settings
//! live, whether the user acts as game master, paging and roll-table limits,
//! tab visibility and default sort orders. Configuration is stored as TOML in
//! the user's config directory.

use crate::filters::SortDirection;
use crate::results::DEFAULT_RESULT_LIMIT;
use crate::tabs::TabName;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default ceiling on roll-table size
pub const DEFAULT_ROLL_TABLE_MAX: usize = 1000;

const fn default_result_limit_step() -> usize {
    DEFAULT_RESULT_LIMIT
}

const fn default_roll_table_max() -> usize {
    DEFAULT_ROLL_TABLE_MAX
}

/// Default sort of one tab
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SortPreference {
    pub by: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Directory holding one JSON file per pack
    #[serde(default)]
    pub packs_dir: Option<PathBuf>,

    /// File backing the persisted pack and source settings
    #[serde(default)]
    pub settings_file: Option<PathBuf>,

    /// Act as game master: GM-only tabs open and source filtering may be
    /// bypassed
    #[serde(default)]
    pub game_master: bool,

    /// Results revealed per page
    #[serde(default = "default_result_limit_step")]
    pub result_limit_step: usize,

    /// Largest result set a roll table may be built from
    #[serde(default = "default_roll_table_max")]
    pub roll_table_max_results: usize,

    /// Tabs left out of the navigation
    #[serde(default)]
    pub hidden_tabs: Vec<TabName>,

    /// Default sort per tab name
    #[serde(default)]
    pub sort: BTreeMap<String, SortPreference>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            packs_dir: None,
            settings_file: None,
            game_master: false,
            result_limit_step: DEFAULT_RESULT_LIMIT,
            roll_table_max_results: DEFAULT_ROLL_TABLE_MAX,
            hidden_tabs: Vec::new(),
            sort: BTreeMap::new(),
        }
    }
}

impl BrowserConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("compendium").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, creating a default one if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Whether a tab is hidden from the navigation
    #[must_use]
    pub fn is_hidden(&self, tab: TabName) -> bool {
        self.hidden_tabs.contains(&tab)
    }

    /// Default sort configured for a tab
    #[must_use]
    pub fn sort_for(&self, tab: TabName) -> Option<&SortPreference> {
        self.sort.get(tab.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(!config.game_master);
        assert_eq!(config.result_limit_step, 100);
        assert_eq!(config.roll_table_max_results, 1000);
        assert!(config.hidden_tabs.is_empty());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = BrowserConfig::load_from(&path).unwrap();
        assert_eq!(config, BrowserConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = BrowserConfig {
            game_master: true,
            result_limit_step: 25,
            hidden_tabs: vec![TabName::Hazard],
            ..BrowserConfig::default()
        };
        config.sort.insert(
            "spell".to_string(),
            SortPreference {
                by: "rank".to_string(),
                direction: SortDirection::Desc,
            },
        );
        config.save_to(&path).unwrap();

        let loaded = BrowserConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.is_hidden(TabName::Hazard));
        assert_eq!(loaded.sort_for(TabName::Spell).map(|s| s.by.as_str()), Some("rank"));
        assert!(loaded.sort_for(TabName::Feat).is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "game_master = true\n").unwrap();

        let config = BrowserConfig::load_from(&path).unwrap();
        assert!(config.game_master);
        assert_eq!(config.roll_table_max_results, DEFAULT_ROLL_TABLE_MAX);
    }
}
