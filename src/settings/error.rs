//! Error types for the settings store

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing persisted settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error for '{key}': {message}")]
    Serialization { key: String, message: String },

    /// Settings directory could not be determined
    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl SettingsError {
    pub(crate) fn serialization(key: &str, err: &serde_json::Error) -> Self {
        Self::Serialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_names_key() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let error = SettingsError::serialization("compendiumBrowserPacks", &err);
        assert!(error.to_string().contains("compendiumBrowserPacks"));
    }
}
