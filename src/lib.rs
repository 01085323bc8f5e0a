//! Compendium - a faceted browser and search index for tabletop rule content
//!
//! This library loads indexes of named content collections ("packs"),
//! projects each record into a per-category search entry, and serves
//! full-text search, faceted filtering, sorting and paged results over them.
//! Publication sources can be toggled globally, filtered results can be
//! exported as roll tables, and pack and source toggles persist between runs.

use thiserror::Error;

pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod host;
pub mod loader;
pub mod output;
pub mod record;
pub mod results;
pub mod search;
pub mod settings;
pub mod sources;
pub mod tabs;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CompendiumError {
    /// Browser controller error
    #[error("Browser error: {0}")]
    Browser(#[from] browse::BrowserError),
    /// Host service error
    #[error("Host error: {0}")]
    Host(#[from] host::HostError),
    /// Persisted settings error
    #[error("Settings error: {0}")]
    Settings(#[from] settings::SettingsError),
    /// Pack loading error
    #[error("Loader error: {0}")]
    Loader(#[from] loader::LoaderError),
    /// Source registry error
    #[error("Sources error: {0}")]
    Sources(#[from] sources::SourcesError),
    /// Tab error
    #[error("Tab error: {0}")]
    Tab(#[from] tabs::TabError),
    /// Filter error
    #[error("Filter error: {0}")]
    Filter(#[from] filters::FilterError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
