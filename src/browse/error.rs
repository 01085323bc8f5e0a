//! Error types for the browser controller

use crate::filters::FilterError;
use crate::host::HostError;
use crate::loader::LoaderError;
use crate::settings::SettingsError;
use crate::sources::SourcesError;
use crate::tabs::{TabError, TabName};
use thiserror::Error;

/// Browser controller errors
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Tab name that is neither a data tab nor `settings`
    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    /// GM-only tab opened without game master rights
    #[error("Tab {0} is only available to the game master")]
    GmOnlyTab(TabName),

    /// Filter supplied for a tab that has not been initialized
    #[error("Tab {0} must be initialized before a filter can be applied")]
    UninitializedTab(TabName),

    /// Operation needs an open data tab
    #[error("No data tab is open")]
    NoActiveTab,

    #[error("Tab error: {0}")]
    Tab(#[from] TabError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    #[error("Sources error: {0}")]
    Sources(#[from] SourcesError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
