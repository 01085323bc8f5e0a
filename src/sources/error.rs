//! Error types for source registry maintenance

use crate::loader::LoaderError;
use crate::settings::SettingsError;
use thiserror::Error;

/// Errors raised while rescanning or persisting sources
#[derive(Debug, Error)]
pub enum SourcesError {
    /// Index fetch failed during a rescan
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Persisting the registry failed
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
