//! Result ordering and incremental reveal
//!
//! Sorting is stable. Text keys use [`collate`]; numeric keys compare the
//! entry's facet of the same name and fall back to name order on ties.
//! Entries without the numeric facet sort first. A descending order is the
//! reverse of the ascending one.

use crate::filters::{SortDirection, SortKind, SortOrder};
use crate::search::collate;
use crate::tabs::SearchEntry;
use std::cmp::Ordering;

/// Results revealed before the user scrolls
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// Order entries by the configured key and direction
pub fn sort_result(entries: &mut [&SearchEntry], order: &SortOrder) {
    let by_name = |a: &SearchEntry, b: &SearchEntry| collate(&a.name, &b.name);
    match order.kind() {
        SortKind::Alpha if order.by == "name" => entries.sort_by(|a, b| by_name(*a, *b)),
        SortKind::Alpha => entries.sort_by(|a, b| {
            let key = |e: &SearchEntry| e.list(&order.by).join(", ");
            collate(&key(*a), &key(*b)).then_with(|| by_name(*a, *b))
        }),
        SortKind::Numeric => entries.sort_by(|a, b| {
            compare_numbers(a.number(&order.by), b.number(&order.by)).then_with(|| by_name(*a, *b))
        }),
    }
    if order.direction == SortDirection::Desc {
        entries.reverse();
    }
}

fn compare_numbers(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Growing window over a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimit {
    step: usize,
    limit: usize,
}

impl ResultLimit {
    #[must_use]
    pub const fn new(step: usize) -> Self {
        let step = if step == 0 { DEFAULT_RESULT_LIMIT } else { step };
        Self { step, limit: step }
    }

    #[must_use]
    pub const fn get(&self) -> usize {
        self.limit
    }

    /// Back to the first page
    pub const fn reset(&mut self) {
        self.limit = self.step;
    }

    /// Reveal one more page, up to `total`; returns whether anything changed
    pub fn advance(&mut self, total: usize) -> bool {
        if self.limit >= total {
            return false;
        }
        self.limit += self.step;
        true
    }

    /// The visible prefix of a result list
    #[must_use]
    pub fn visible<'a, T>(&self, results: &'a [T]) -> &'a [T] {
        &results[..results.len().min(self.limit)]
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_LIMIT)
    }
}
