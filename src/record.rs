//! Raw index records as delivered by a content collection
//!
//! An [`IndexedRecord`] is the field-limited projection of one document in a
//! pack. Apart from a handful of top-level keys, everything a tab needs lives
//! under the free-form `system` object, addressed with dotted field paths such
//! as `system.level.value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Top-level key holding the category-specific data of a record
pub const SYSTEM_ROOT: &str = "system";

/// Document class a collection holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Actor,
    Item,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor => write!(f, "Actor"),
            Self::Item => write!(f, "Item"),
        }
    }
}

/// One indexed document of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedRecord {
    /// Document id, unique within its collection
    #[serde(rename = "_id")]
    pub id: String,

    /// Collection the record was fetched from
    #[serde(default)]
    pub collection: String,

    /// Display name
    pub name: String,

    /// Category tag (`spell`, `npc`, `weapon`, ...)
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Icon reference
    #[serde(default)]
    pub img: String,

    /// Untranslated name when a translation module renamed the record
    #[serde(default, rename = "originalName", skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,

    /// Category-specific data; `Null` when the index carries no system data
    #[serde(default)]
    pub system: Value,
}

impl IndexedRecord {
    /// Look up a dotted field path
    ///
    /// Only paths below `system` resolve to JSON values. Returns `None` when any
    /// segment is missing or when the value is JSON `null`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let rest = path.strip_prefix(SYSTEM_ROOT)?;
        if rest.is_empty() {
            return (!self.system.is_null()).then_some(&self.system);
        }
        let rest = rest.strip_prefix('.')?;
        let value = rest
            .split('.')
            .try_fold(&self.system, |current, segment| current.get(segment))?;
        (!value.is_null()).then_some(value)
    }

    /// Whether the record carries a value for the given field path
    #[must_use]
    pub fn has_field(&self, path: &str) -> bool {
        match path {
            "_id" | "name" | "type" | "img" => true,
            "originalName" => self.original_name.is_some(),
            _ => self.get(path).is_some(),
        }
    }

    /// Whether the root data object is present at all
    #[must_use]
    pub fn has_system_data(&self) -> bool {
        self.system.is_object()
    }

    /// Read a string field
    #[must_use]
    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Read an integer field, accepting numeric strings
    #[must_use]
    pub fn int_field(&self, path: &str) -> Option<i64> {
        match self.get(path)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Read a list of strings, skipping non-string elements
    #[must_use]
    pub fn string_list(&self, path: &str) -> Vec<String> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Project the record down to the given field paths
    ///
    /// Top-level keys are always kept. The projected `system` stays `Null` when
    /// the source record has no system object, so a stale index is still
    /// recognizable after projection.
    #[must_use]
    pub fn project(&self, fields: &[&str]) -> Self {
        let mut system = if self.system.is_object() {
            Value::Object(Map::new())
        } else {
            Value::Null
        };

        for field in fields {
            let Some(rest) = field
                .strip_prefix(SYSTEM_ROOT)
                .and_then(|r| r.strip_prefix('.'))
            else {
                continue;
            };
            if let Some(value) = self.get(field) {
                insert_path(&mut system, rest, value.clone());
            }
        }

        Self {
            id: self.id.clone(),
            collection: self.collection.clone(),
            name: self.name.clone(),
            doc_type: self.doc_type.clone(),
            img: self.img.clone(),
            original_name: self.original_name.clone(),
            system,
        }
    }

    /// Stable cross-collection reference to this record
    #[must_use]
    pub fn uuid(&self, document_type: DocumentType) -> String {
        format!("Compendium.{}.{}.{}", self.collection, document_type, self.id)
    }
}

fn insert_path(target: &mut Value, path: &str, value: Value) {
    let mut current = target;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
