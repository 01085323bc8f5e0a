//! Roll-table export
//!
//! A filtered result set becomes a sequence of table results, each worth one
//! point of weight and covering one face of the table's die. Results appended
//! to an existing table continue numbering after its current highest range.

use crate::host::HostError;
use crate::tabs::SearchEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a roll table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableResult {
    pub text: String,
    /// Collection the referenced document lives in
    pub collection: String,
    pub document_id: String,
    pub img: String,
    pub weight: u32,
    /// Inclusive die range
    pub range: [u32; 2],
}

/// A stored roll table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTable {
    pub id: String,
    pub name: String,
    pub formula: String,
    pub results: Vec<TableResult>,
}

impl RollTable {
    /// Highest die face covered so far
    #[must_use]
    pub fn max_range(&self) -> u32 {
        self.results.iter().map(|r| r.range[1]).max().unwrap_or(0)
    }
}

/// Dice formula covering `faces` results
#[must_use]
pub fn formula(faces: u32) -> String {
    format!("1d{faces}")
}

/// Table results for entries, numbered after `start`
#[must_use]
pub fn build_results(entries: &[&SearchEntry], start: u32) -> Vec<TableResult> {
    (start + 1..)
        .zip(entries)
        .map(|(face, entry)| TableResult {
            text: entry.name.clone(),
            collection: entry.collection.clone(),
            document_id: entry.id.clone(),
            img: entry.img.clone(),
            weight: 1,
            range: [face, face],
        })
        .collect()
}

/// Host-side roll-table storage
pub trait RollTableStore {
    /// Create a table and return its id
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host refuses the table.
    fn create(&mut self, name: &str, results: Vec<TableResult>) -> Result<String, HostError>;

    fn get(&self, id: &str) -> Option<RollTable>;

    /// Append results to an existing table
    ///
    /// # Errors
    ///
    /// Returns `HostError::TableNotFound` for an unknown id.
    fn append(&mut self, id: &str, results: Vec<TableResult>) -> Result<(), HostError>;
}

/// Roll tables kept in memory
#[derive(Debug, Default)]
pub struct MemoryRollTables {
    tables: BTreeMap<String, RollTable>,
    next_id: usize,
}

impl MemoryRollTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl RollTableStore for MemoryRollTables {
    fn create(&mut self, name: &str, results: Vec<TableResult>) -> Result<String, HostError> {
        self.next_id += 1;
        let id = format!("table-{}", self.next_id);
        let faces = u32::try_from(results.len()).unwrap_or(u32::MAX);
        self.tables.insert(
            id.clone(),
            RollTable {
                id: id.clone(),
                name: name.to_string(),
                formula: formula(faces),
                results,
            },
        );
        Ok(id)
    }

    fn get(&self, id: &str) -> Option<RollTable> {
        self.tables.get(id).cloned()
    }

    fn append(&mut self, id: &str, results: Vec<TableResult>) -> Result<(), HostError> {
        let table = self
            .tables
            .get_mut(id)
            .ok_or_else(|| HostError::TableNotFound(id.to_string()))?;
        table.results.extend(results);
        table.formula = formula(table.max_range());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;

    fn entry(id: &str) -> SearchEntry {
        SearchEntry {
            uuid: format!("Compendium.pf2e.spells-srd.Item.{id}"),
            collection: "pf2e.spells-srd".to_string(),
            id: id.to_string(),
            name: id.to_uppercase(),
            original_name: None,
            doc_type: "spell".to_string(),
            img: String::new(),
            facets: Map::new(),
        }
    }

    #[test]
    fn test_sequential_ranges() {
        let entries = [entry("a"), entry("b"), entry("c")];
        let refs: Vec<_> = entries.iter().collect();
        let results = build_results(&refs, 0);
        let ranges: Vec<_> = results.iter().map(|r| r.range).collect();
        assert_eq!(ranges, vec![[1, 1], [2, 2], [3, 3]]);
        assert!(results.iter().all(|r| r.weight == 1));
        assert_eq!(results[1].document_id, "b");
        assert_eq!(results[1].collection, "pf2e.spells-srd");
    }

    #[test]
    fn test_append_continues_numbering() {
        let entries = [entry("a"), entry("b")];
        let refs: Vec<_> = entries.iter().collect();
        let mut store = MemoryRollTables::new();
        let id = store.create("Loot", build_results(&refs, 0)).unwrap();

        let start = store.get(&id).unwrap().max_range();
        store.append(&id, build_results(&refs[..1], start)).unwrap();

        let table = store.get(&id).unwrap();
        assert_eq!(table.results.last().unwrap().range, [3, 3]);
        assert_eq!(table.formula, "1d3");
    }

    #[test]
    fn test_append_unknown_table() {
        let mut store = MemoryRollTables::new();
        assert!(matches!(
            store.append("missing", Vec::new()),
            Err(HostError::TableNotFound(_))
        ));
    }
}
