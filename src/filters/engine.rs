//! Filter predicate evaluation
//!
//! [`FilterEngine`] compiles a [`FilterState`] against a tab's full-text index
//! once, then answers [`FilterEngine::filter_index_data`] per entry. Facet
//! categories combine with AND and evaluation stops at the first failing
//! predicate. The engine holds no mutable state, so evaluating an entry twice
//! gives the same answer.
//!
//! # Free text
//!
//! The search text is split on commas; every clause must match.
//! - `key:value` matches when the entry's `key` facet contains `value`
//!   (both normalized)
//! - any other clause matches when it has no searchable tokens, when the
//!   full-text index matches all of its tokens, or when the normalized name
//!   contains the normalized clause

use super::types::{Conjunction, FilterState, SelectedOption};
use crate::search::{normalize, SearchIndex};
use crate::tabs::SearchEntry;
use rayon::prelude::*;
use std::collections::HashSet;

/// Check an entry's traits against a multiselect selection
///
/// Negated options reject first. With positive options present, `and` needs
/// all of them and `or` needs one. No positive options means pass.
///
/// # Examples
/// ```
/// # use compendium::filters::{filter_traits, Conjunction, SelectedOption};
/// let selected = vec![
///     SelectedOption { value: "fire".into(), label: "Fire".into(), not: false },
///     SelectedOption { value: "water".into(), label: "Water".into(), not: true },
/// ];
/// assert!(filter_traits(&["fire".into()], &selected, Conjunction::And));
/// assert!(!filter_traits(&["fire".into(), "water".into()], &selected, Conjunction::Or));
/// ```
#[must_use]
pub fn filter_traits(traits: &[String], selected: &[SelectedOption], conjunction: Conjunction) -> bool {
    let has = |value: &str| traits.iter().any(|t| t == value);

    if selected.iter().filter(|s| s.not).any(|s| has(&s.value)) {
        return false;
    }

    let mut positive = selected.iter().filter(|s| !s.not).peekable();
    if positive.peek().is_none() {
        return true;
    }
    match conjunction {
        Conjunction::And => positive.all(|s| has(&s.value)),
        Conjunction::Or => positive.any(|s| has(&s.value)),
    }
}

/// One comma-separated clause of the search text
#[derive(Debug, Clone)]
enum TextClause {
    Keyed { key: String, value: String },
    Terms {
        normalized: String,
        hits: Option<HashSet<usize>>,
    },
}

impl TextClause {
    fn parse(clause: &str, index: &SearchIndex) -> Option<Self> {
        let clause = clause.trim();
        if clause.is_empty() {
            return None;
        }
        if let Some((key, value)) = clause.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                return Some(Self::Keyed {
                    key: key.to_string(),
                    value: normalize(value),
                });
            }
        }
        Some(Self::Terms {
            normalized: normalize(clause),
            hits: index.search(clause),
        })
    }

    fn matches(&self, position: usize, entry: &SearchEntry) -> bool {
        match self {
            Self::Keyed { key, value } => entry
                .facet(key)
                .is_some_and(|facet| facet.any_key(|k| normalize(k).contains(value.as_str()))),
            Self::Terms { normalized, hits } => match hits {
                None => true,
                Some(hits) => {
                    hits.contains(&position)
                        || (!normalized.is_empty() && normalize(&entry.name).contains(normalized.as_str()))
                }
            },
        }
    }
}

/// Compiled filter for one tab
#[derive(Debug)]
pub struct FilterEngine<'a> {
    filter: &'a FilterState,
    clauses: Vec<TextClause>,
}

impl<'a> FilterEngine<'a> {
    /// Compile the filter state against the tab's search index
    #[must_use]
    pub fn new(filter: &'a FilterState, index: &SearchIndex) -> Self {
        let clauses = filter
            .search
            .split(',')
            .filter_map(|clause| TextClause::parse(clause, index))
            .collect();
        Self { filter, clauses }
    }

    /// Whether the entry at `position` of the tab passes every predicate
    #[must_use]
    pub fn filter_index_data(&self, position: usize, entry: &SearchEntry) -> bool {
        self.checkboxes(entry)
            && self.selects(entry)
            && self.multiselects(entry)
            && self.ranges(entry)
            && self.clauses.iter().all(|clause| clause.matches(position, entry))
    }

    /// Positions of all passing entries, in order
    #[must_use]
    pub fn apply(&self, entries: &[SearchEntry]) -> Vec<usize> {
        entries
            .par_iter()
            .enumerate()
            .filter(|(position, entry)| self.filter_index_data(*position, entry))
            .map(|(position, _)| position)
            .collect()
    }

    fn checkboxes(&self, entry: &SearchEntry) -> bool {
        self.filter.checkboxes.values().all(|group| {
            !group.is_active()
                || entry
                    .facet(&group.facet)
                    .is_some_and(|facet| facet.any_key(|k| group.selected.iter().any(|s| s == k)))
        })
    }

    fn selects(&self, entry: &SearchEntry) -> bool {
        self.filter.selects.values().all(|select| match &select.selected {
            None => true,
            Some(value) => entry
                .facet(&select.facet)
                .is_some_and(|facet| facet.any_key(|k| k == value)),
        })
    }

    fn multiselects(&self, entry: &SearchEntry) -> bool {
        self.filter.multiselects.values().all(|group| {
            !group.is_active() || filter_traits(&entry.list(&group.facet), &group.selected, group.conjunction)
        })
    }

    fn ranges(&self, entry: &SearchEntry) -> bool {
        self.filter.ranges.values().all(|range| {
            !range.is_narrowed()
                || entry
                    .number(&range.facet)
                    .is_some_and(|value| range.contains(value))
        })
    }
}
