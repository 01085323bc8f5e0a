//! Filter state data structures
//!
//! A [`FilterState`] is the full faceted query of one tab:
//! - free-text search
//! - `CheckboxGroup`: pick any of a fixed set of options
//! - `MultiselectGroup`: trait-style lists with per-option negation and an
//!   `and`/`or` conjunction
//! - `RangeFilter`: numeric bounds with a narrowed `lower..=upper` selection
//! - `SelectFilter`: a single choice
//! - `SortOrder`: sort key and direction
//!
//! Every group names the entry facet it reads, so one generic predicate serves
//! all tabs.

use super::error::FilterError;
use crate::search::collate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How positive multiselect options combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    /// Entry must have every selected option
    #[default]
    And,
    /// Entry must have at least one selected option
    Or,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Whether a sort key compares text or numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    Alpha,
    Numeric,
}

/// A selectable value with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn sort_options(options: &mut [FilterOption]) {
    options.sort_by(|a, b| collate(&a.label, &b.label).then_with(|| a.value.cmp(&b.value)));
}

/// Checkbox option with its selection flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Any-of selection over a fixed option set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxGroup {
    pub facet: String,
    pub label: String,
    pub is_expanded: bool,
    pub options: Vec<CheckboxOption>,
    pub selected: Vec<String>,
}

impl CheckboxGroup {
    pub fn new(facet: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            label: label.into(),
            is_expanded: true,
            options: Vec::new(),
            selected: Vec::new(),
        }
    }

    /// Replace the option list, sorted by label
    ///
    /// Options passed in `keep_order` mode keep their given order instead.
    /// Selections of values that are no longer offered are dropped.
    pub fn set_options(&mut self, mut options: Vec<FilterOption>, keep_order: bool) {
        if !keep_order {
            sort_options(&mut options);
        }
        self.selected.retain(|value| options.iter().any(|o| &o.value == value));
        self.options = options
            .into_iter()
            .map(|option| CheckboxOption {
                selected: self.selected.contains(&option.value),
                value: option.value,
                label: option.label,
            })
            .collect();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Flip one option; returns the new selection state
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownOption` if the value is not offered.
    pub fn toggle(&mut self, value: &str) -> Result<bool, FilterError> {
        let option = self
            .options
            .iter_mut()
            .find(|o| o.value == value)
            .ok_or_else(|| FilterError::UnknownOption {
                group: self.facet.clone(),
                option: value.to_string(),
            })?;
        option.selected = !option.selected;
        if option.selected {
            self.selected.push(value.to_string());
        } else {
            self.selected.retain(|v| v != value);
        }
        Ok(option.selected)
    }

    /// Select an option if offered; returns whether it is now selected
    pub fn select(&mut self, value: &str) -> bool {
        let Some(option) = self.options.iter_mut().find(|o| o.value == value) else {
            return false;
        };
        if !option.selected {
            option.selected = true;
            self.selected.push(value.to_string());
        }
        true
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        for option in &mut self.options {
            option.selected = false;
        }
    }
}

/// Selected multiselect option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub not: bool,
}

/// Trait-style selection with negation and a conjunction mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiselectGroup {
    pub facet: String,
    pub label: String,
    pub conjunction: Conjunction,
    pub options: Vec<FilterOption>,
    pub selected: Vec<SelectedOption>,
}

impl MultiselectGroup {
    pub fn new(facet: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            label: label.into(),
            conjunction: Conjunction::And,
            options: Vec::new(),
            selected: Vec::new(),
        }
    }

    /// Replace the option list, sorted by label
    pub fn set_options(&mut self, mut options: Vec<FilterOption>) {
        sort_options(&mut options);
        self.selected
            .retain(|s| options.iter().any(|o| o.value == s.value));
        self.options = options;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Select an option, positively or negated
    ///
    /// Re-selecting a value replaces its previous polarity.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownOption` if the value is not offered.
    pub fn select(&mut self, value: &str, not: bool) -> Result<(), FilterError> {
        let option = self
            .options
            .iter()
            .find(|o| o.value == value)
            .ok_or_else(|| FilterError::UnknownOption {
                group: self.facet.clone(),
                option: value.to_string(),
            })?;
        let selected = SelectedOption {
            value: option.value.clone(),
            label: option.label.clone(),
            not,
        };
        match self.selected.iter_mut().find(|s| s.value == value) {
            Some(existing) => *existing = selected,
            None => self.selected.push(selected),
        }
        Ok(())
    }

    pub fn deselect(&mut self, value: &str) {
        self.selected.retain(|s| s.value != value);
    }
}

/// Inclusive numeric range with fixed bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub facet: String,
    pub label: String,
    pub is_expanded: bool,
    /// Lowest selectable value
    pub min: i64,
    /// Highest selectable value
    pub max: i64,
    /// Current lower selection
    pub lower: i64,
    /// Current upper selection
    pub upper: i64,
    pub step: i64,
}

impl RangeFilter {
    pub fn new(facet: impl Into<String>, label: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            facet: facet.into(),
            label: label.into(),
            is_expanded: false,
            min,
            max,
            lower: min,
            upper: max,
            step: 1,
        }
    }

    /// Whether the selection excludes part of the bounds
    #[must_use]
    pub const fn is_narrowed(&self) -> bool {
        self.lower > self.min || self.upper < self.max
    }

    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Set the selection, clamped to the bounds
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidRange` if `lower > upper`.
    pub fn set(&mut self, lower: i64, upper: i64) -> Result<(), FilterError> {
        if lower > upper {
            return Err(FilterError::InvalidRange {
                group: self.facet.clone(),
                lower,
                upper,
            });
        }
        self.lower = lower.clamp(self.min, self.max);
        self.upper = upper.clamp(self.min, self.max);
        Ok(())
    }
}

/// Single-choice filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectFilter {
    pub facet: String,
    pub label: String,
    pub options: Vec<FilterOption>,
    pub selected: Option<String>,
}

impl SelectFilter {
    pub fn new(facet: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            label: label.into(),
            options: Vec::new(),
            selected: None,
        }
    }

    /// Choose a value, or clear with `None`
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownOption` if the value is not offered.
    pub fn choose(&mut self, value: Option<&str>) -> Result<(), FilterError> {
        if let Some(value) = value
            && !self.options.iter().any(|o| o.value == value)
        {
            return Err(FilterError::UnknownOption {
                group: self.facet.clone(),
                option: value.to_string(),
            });
        }
        self.selected = value.map(str::to_string);
        Ok(())
    }
}

/// Offered sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub key: String,
    pub label: String,
    pub kind: SortKind,
}

impl SortOption {
    pub fn alpha(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: SortKind::Alpha,
        }
    }

    pub fn numeric(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: SortKind::Numeric,
        }
    }
}

/// Sort configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub by: String,
    pub direction: SortDirection,
    pub options: Vec<SortOption>,
}

impl SortOrder {
    /// Sort options with the first one active, ascending
    #[must_use]
    pub fn new(options: Vec<SortOption>) -> Self {
        Self {
            by: options
                .first()
                .map_or_else(|| "name".to_string(), |o| o.key.clone()),
            direction: SortDirection::Asc,
            options,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SortKind {
        self.options
            .iter()
            .find(|o| o.key == self.by)
            .map_or(SortKind::Alpha, |o| o.kind)
    }
}

/// The complete faceted query of a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub checkboxes: BTreeMap<String, CheckboxGroup>,
    pub multiselects: BTreeMap<String, MultiselectGroup>,
    pub ranges: BTreeMap<String, RangeFilter>,
    pub selects: BTreeMap<String, SelectFilter>,
    pub order: SortOrder,
}

impl FilterState {
    /// Empty filter state with the given sort options
    #[must_use]
    pub fn new(order: SortOrder) -> Self {
        Self {
            search: String::new(),
            checkboxes: BTreeMap::new(),
            multiselects: BTreeMap::new(),
            ranges: BTreeMap::new(),
            selects: BTreeMap::new(),
            order,
        }
    }

    #[must_use]
    pub fn with_checkbox(mut self, key: &str, group: CheckboxGroup) -> Self {
        self.checkboxes.insert(key.to_string(), group);
        self
    }

    #[must_use]
    pub fn with_multiselect(mut self, key: &str, group: MultiselectGroup) -> Self {
        self.multiselects.insert(key.to_string(), group);
        self
    }

    #[must_use]
    pub fn with_range(mut self, key: &str, range: RangeFilter) -> Self {
        self.ranges.insert(key.to_string(), range);
        self
    }

    #[must_use]
    pub fn with_select(mut self, key: &str, select: SelectFilter) -> Self {
        self.selects.insert(key.to_string(), select);
        self
    }

    /// Checkbox group by key
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownGroup` if the tab has no such group.
    pub fn checkbox_mut(&mut self, key: &str) -> Result<&mut CheckboxGroup, FilterError> {
        self.checkboxes
            .get_mut(key)
            .ok_or_else(|| FilterError::UnknownGroup(key.to_string()))
    }

    /// Multiselect group by key
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownGroup` if the tab has no such group.
    pub fn multiselect_mut(&mut self, key: &str) -> Result<&mut MultiselectGroup, FilterError> {
        self.multiselects
            .get_mut(key)
            .ok_or_else(|| FilterError::UnknownGroup(key.to_string()))
    }

    /// Range filter by key
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownGroup` if the tab has no such range.
    pub fn range_mut(&mut self, key: &str) -> Result<&mut RangeFilter, FilterError> {
        self.ranges
            .get_mut(key)
            .ok_or_else(|| FilterError::UnknownGroup(key.to_string()))
    }

    /// Select filter by key
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownGroup` if the tab has no such select.
    pub fn select_mut(&mut self, key: &str) -> Result<&mut SelectFilter, FilterError> {
        self.selects
            .get_mut(key)
            .ok_or_else(|| FilterError::UnknownGroup(key.to_string()))
    }

    /// Toggle one checkbox option
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the group or option does not exist.
    pub fn toggle_checkbox(&mut self, key: &str, value: &str) -> Result<bool, FilterError> {
        self.checkbox_mut(key)?.toggle(value)
    }

    /// Select one multiselect option
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the group or option does not exist.
    pub fn select_option(&mut self, key: &str, value: &str, not: bool) -> Result<(), FilterError> {
        self.multiselect_mut(key)?.select(value, not)
    }

    /// Change a multiselect conjunction
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownGroup` if the group does not exist.
    pub fn set_conjunction(&mut self, key: &str, conjunction: Conjunction) -> Result<(), FilterError> {
        self.multiselect_mut(key)?.conjunction = conjunction;
        Ok(())
    }

    /// Narrow a range
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the range does not exist or is inverted.
    pub fn set_range(&mut self, key: &str, lower: i64, upper: i64) -> Result<(), FilterError> {
        self.range_mut(key)?.set(lower, upper)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Change the sort key and direction
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownSortKey` if the key is not offered.
    pub fn set_order(&mut self, by: &str, direction: SortDirection) -> Result<(), FilterError> {
        if !self.order.options.iter().any(|o| o.key == by) {
            return Err(FilterError::UnknownSortKey(by.to_string()));
        }
        self.order.by = by.to_string();
        self.order.direction = direction;
        Ok(())
    }
}
