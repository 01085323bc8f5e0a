//! Error types for pack loading
//!
//! The loader does not recover from host failures: a fetch error ends the
//! current load and travels up to whoever initialized the tab.

use crate::host::HostError;
use thiserror::Error;

/// Pack loading errors
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The host failed to deliver an index
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}
