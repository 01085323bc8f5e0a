//! Faceted filtering of tab entries
//!
//! This module provides the filter state each tab carries and the predicate
//! that evaluates it against search entries.
//!
//! # Features
//!
//! - **Checkbox groups**: any-of selection; an empty selection does not
//!   constrain
//! - **Multiselect groups**: per-option negation and `and`/`or` conjunction
//! - **Ranges**: inclusive numeric bounds such as level or price
//! - **Free text**: comma-separated clauses, `key:value` clauses address one
//!   facet
//!
//! # Examples
//!
//! ```
//! use compendium::filters::{CheckboxGroup, FilterOption, FilterState, SortOption, SortOrder};
//!
//! let mut rarity = CheckboxGroup::new("rarity", "Rarity");
//! rarity.set_options(vec![FilterOption::new("rare", "Rare")], false);
//!
//! let mut filter = FilterState::new(SortOrder::new(vec![SortOption::alpha("name", "Name")]))
//!     .with_checkbox("rarity", rarity);
//! filter.toggle_checkbox("rarity", "rare").unwrap();
//! assert!(filter.checkboxes["rarity"].is_active());
//! ```

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{FilterEngine, filter_traits};
pub use error::FilterError;
pub use types::{
    CheckboxGroup, CheckboxOption, Conjunction, FilterOption, FilterState, MultiselectGroup,
    RangeFilter, SelectFilter, SelectedOption, SortDirection, SortKind, SortOption, SortOrder,
};
