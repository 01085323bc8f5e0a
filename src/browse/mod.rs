//! Browser controller
//!
//! Owns the tabs and the host services, decides which tabs may open, tracks
//! navigation visibility and the paged result window, exports filtered
//! results to roll tables and applies the settings view.

pub mod error;
pub mod navigation;
pub mod openers;
pub mod rolltable;
pub mod session;
pub mod settings_form;

pub use error::BrowserError;
pub use navigation::{ActiveView, Navigation, OpenOptions};
pub use openers::{ActionTabOptions, SpellEntryKind, SpellTabOptions};
pub use rolltable::{MemoryRollTables, RollTable, RollTableStore, TableResult};
pub use session::{Browser, BrowserServices, BrowserView};
pub use settings_form::SettingsForm;
