//! Error types for tab initialization

use super::TabName;
use crate::filters::FilterError;
use crate::loader::LoaderError;
use thiserror::Error;

/// Tab errors
#[derive(Debug, Error)]
pub enum TabError {
    /// Filter access before the first `init`
    #[error("Tab {0} is not initialized")]
    Uninitialized(TabName),

    /// Pack loading failed
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Filter state rejected a change
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

/// A record whose data does not fit the tab's expected shape
#[derive(Debug, Error)]
#[error("Unexpected data shape: {0}")]
pub struct ExtractError(#[from] pub serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_display() {
        let error = TabError::Uninitialized(TabName::Spell);
        assert_eq!(error.to_string(), "Tab spell is not initialized");
    }

    #[test]
    fn test_extract_error_display() {
        let source = serde_json::from_str::<i64>("\"x\"").unwrap_err();
        let error = ExtractError::from(source);
        assert!(error.to_string().starts_with("Unexpected data shape: "));
    }
}
