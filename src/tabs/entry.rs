//! Flattened search entries
//!
//! A [`SearchEntry`] is the projection of one indexed record onto the facet
//! set of one tab. Entries refer back to their pack only through strings
//! (`uuid`, `collection`, `id`).

use crate::record::{DocumentType, IndexedRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of one facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl FacetValue {
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a list of option keys
    ///
    /// Numbers become their decimal string, so numeric facets can back
    /// checkbox groups such as spell ranks.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match self {
            Self::Number(n) => vec![n.to_string()],
            Self::Text(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
        }
    }

    /// Whether any of the value's keys satisfies the predicate
    pub fn any_key(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        match self {
            Self::Number(n) => predicate(&n.to_string()),
            Self::Text(s) => predicate(s),
            Self::List(items) => items.iter().any(|item| predicate(item)),
        }
    }
}

/// One searchable row of a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub uuid: String,
    pub collection: String,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub img: String,
    pub facets: BTreeMap<String, FacetValue>,
}

impl SearchEntry {
    /// Start an entry from the record's identity fields
    #[must_use]
    pub fn from_record(record: &IndexedRecord, document_type: DocumentType) -> Self {
        Self {
            uuid: record.uuid(document_type),
            collection: record.collection.clone(),
            id: record.id.clone(),
            name: record.name.clone(),
            original_name: record.original_name.clone(),
            doc_type: record.doc_type.clone(),
            img: record.img.clone(),
            facets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn facet(&self, key: &str) -> Option<&FacetValue> {
        self.facets.get(key)
    }

    #[must_use]
    pub fn number(&self, key: &str) -> Option<i64> {
        self.facet(key).and_then(FacetValue::as_number)
    }

    /// List facet contents; a text facet reads as a one-element list
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<String> {
        self.facet(key).map(FacetValue::keys).unwrap_or_default()
    }

    pub fn set_number(&mut self, key: &str, value: i64) {
        self.facets.insert(key.to_string(), FacetValue::Number(value));
    }

    /// Store a text facet; empty strings are left out
    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.facets.insert(key.to_string(), FacetValue::Text(value));
        }
    }

    pub fn set_list(&mut self, key: &str, values: Vec<String>) {
        self.facets.insert(key.to_string(), FacetValue::List(values));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys() {
        assert_eq!(FacetValue::Number(3).keys(), vec!["3".to_string()]);
        assert!(FacetValue::Number(3).any_key(|k| k == "3"));
    }

    #[test]
    fn test_set_text_skips_empty() {
        let mut entry = SearchEntry {
            uuid: String::new(),
            collection: String::new(),
            id: String::new(),
            name: "Test".to_string(),
            original_name: None,
            doc_type: "spell".to_string(),
            img: String::new(),
            facets: BTreeMap::new(),
        };
        entry.set_text("source", "");
        assert!(entry.facet("source").is_none());
        entry.set_text("source", "player-core");
        assert_eq!(entry.list("source"), vec!["player-core".to_string()]);
    }
}
