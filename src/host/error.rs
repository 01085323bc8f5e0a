//! Errors raised by host-side collaborators
//!
//! The host owns persistence and document storage. Whatever goes wrong on its
//! side is reported through [`HostError`] and propagated unchanged by the
//! loader and the browser.

use thiserror::Error;

/// Host-side failures
#[derive(Debug, Error)]
pub enum HostError {
    /// The named collection does not exist
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Fetching a collection index or document failed
    #[error("Failed to fetch from '{collection}': {message}")]
    Fetch { collection: String, message: String },

    /// A roll table id did not resolve
    #[error("Roll table not found: {0}")]
    TableNotFound(String),

    /// I/O error while reading pack files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pack file could not be parsed
    #[error("Invalid pack data in {file}: {message}")]
    InvalidPack { file: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let error = HostError::Fetch {
            collection: "pf2e.spells-srd".to_string(),
            message: "timeout".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch from 'pf2e.spells-srd': timeout"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: HostError = io.into();
        assert!(error.to_string().starts_with("I/O error"));
    }
}
