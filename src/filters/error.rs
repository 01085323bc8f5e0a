//! Error types for filter state manipulation
//!
//! These surface when a caller addresses a filter group, option or sort key
//! that the tab's filter state does not define.

use thiserror::Error;

/// Errors that can occur while changing a filter state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// No group with this key
    #[error("Unknown filter group '{0}'")]
    UnknownGroup(String),

    /// Group exists but has no such option
    #[error("Filter group '{group}' has no option '{option}'")]
    UnknownOption { group: String, option: String },

    /// Sort key not offered by the tab
    #[error("Unknown sort key '{0}'")]
    UnknownSortKey(String),

    /// Range bounds are inverted
    #[error("Invalid range for '{group}': {lower} > {upper}")]
    InvalidRange { group: String, lower: i64, upper: i64 },
}
