//! Inverted full-text index over tab entries
//!
//! Terms are kept in a sorted map so prefix lookups are a range scan. A query
//! matches a document when every query token is a prefix of at least one of
//! the document's terms.

use super::tokenizer::tokenize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Term to document postings
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    terms: BTreeMap<String, BTreeSet<usize>>,
    documents: usize,
}

impl SearchIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one field of a document
    pub fn add(&mut self, document: usize, text: &str) {
        for token in tokenize(text) {
            self.terms.entry(token).or_default().insert(document);
        }
        self.documents = self.documents.max(document + 1);
    }

    /// Number of distinct terms
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Highest document number plus one
    #[must_use]
    pub const fn document_count(&self) -> usize {
        self.documents
    }

    /// Documents matching every token of the query
    ///
    /// Returns `None` when the query has no searchable tokens, meaning it does
    /// not constrain the result.
    #[must_use]
    pub fn search(&self, query: &str) -> Option<HashSet<usize>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return None;
        }

        let mut result: Option<HashSet<usize>> = None;
        for token in &tokens {
            let hits = self.prefix_hits(token);
            let narrowed = match result {
                None => hits,
                Some(current) => current.intersection(&hits).copied().collect(),
            };
            if narrowed.is_empty() {
                return Some(narrowed);
            }
            result = Some(narrowed);
        }
        result
    }

    fn prefix_hits(&self, prefix: &str) -> HashSet<usize> {
        self.terms
            .range(prefix.to_string()..)
            .take_while(|(term, _)| term.starts_with(prefix))
            .flat_map(|(_, documents)| documents.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SearchIndex {
        let mut index = SearchIndex::new();
        index.add(0, "Fireball");
        index.add(1, "Fire Shield");
        index.add(2, "Lightning Bolt");
        index.add(3, "Bolt of Fire");
        index
    }

    #[test]
    fn test_prefix_match() {
        let hits = index().search("fir").unwrap();
        assert_eq!(hits, HashSet::from([0, 1, 3]));
    }

    #[test]
    fn test_all_tokens_required() {
        let hits = index().search("fire bolt").unwrap();
        assert_eq!(hits, HashSet::from([3]));
    }

    #[test]
    fn test_short_query_is_unconstrained() {
        assert!(index().search("a").is_none());
        assert!(index().search("the").is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(index().search("acid").unwrap().is_empty());
    }

    #[test]
    fn test_counts() {
        let index = index();
        assert_eq!(index.document_count(), 4);
        assert!(index.term_count() >= 5);
    }
}
