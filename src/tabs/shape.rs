//! Typed fragments of record `system` data shared by several tabs
//!
//! Descriptors deserialize the projected `system` object into their own
//! shape built from these parts. A record that does not fit is dropped.

use serde::Deserialize;

/// `{ "value": T }` wrapper used throughout record data
#[derive(Debug, Clone, Deserialize)]
pub struct ValueField<T> {
    pub value: T,
}

/// `{ "value": T | null }`, tolerating a missing wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct OptionalValue<T> {
    pub value: Option<T>,
}

impl<T> Default for OptionalValue<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

/// Trait list and rarity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Traits {
    #[serde(default)]
    pub value: Vec<String>,
    #[serde(default)]
    pub rarity: Option<String>,
}

impl Traits {
    #[must_use]
    pub fn has(&self, trait_name: &str) -> bool {
        self.value.iter().any(|t| t == trait_name)
    }

    /// Rarity, `common` when unset
    #[must_use]
    pub fn rarity(&self) -> String {
        self.rarity.clone().unwrap_or_else(|| "common".to_string())
    }
}

/// Action cost of an action or feat
///
/// Stored either as a number of actions or, in older data, as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ActionCount {
    Number(u8),
    Text(#[serde(deserialize_with = "count_from_str")] u8),
}

impl ActionCount {
    #[must_use]
    pub const fn get(self) -> u8 {
        match self {
            Self::Number(n) | Self::Text(n) => n,
        }
    }
}

fn count_from_str<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    text.trim().parse().map_err(serde::de::Error::custom)
}

/// Cost key used by action-cost filters: `1`-`3`, `reaction`, `free`, `passive`
#[must_use]
pub fn action_cost_key(action_type: &str, count: Option<ActionCount>) -> String {
    match action_type {
        "action" => count.map_or_else(|| "1".to_string(), |c| c.get().to_string()),
        "reaction" | "free" => action_type.to_string(),
        _ => "passive".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_traits_defaults() {
        let traits: Traits = serde_json::from_value(json!({ "value": ["fire"] })).unwrap();
        assert!(traits.has("fire"));
        assert_eq!(traits.rarity(), "common");
    }

    #[test]
    fn test_action_count_forms() {
        let number: ActionCount = serde_json::from_value(json!(2)).unwrap();
        let text: ActionCount = serde_json::from_value(json!("3")).unwrap();
        assert_eq!(number.get(), 2);
        assert_eq!(text.get(), 3);
        assert!(serde_json::from_value::<ActionCount>(json!("two")).is_err());
    }

    #[test]
    fn test_optional_action_count() {
        let missing: OptionalValue<ActionCount> = serde_json::from_value(json!({})).unwrap();
        let null: OptionalValue<ActionCount> =
            serde_json::from_value(json!({ "value": null })).unwrap();
        let set: OptionalValue<ActionCount> = serde_json::from_value(json!({ "value": 2 })).unwrap();
        assert!(missing.value.is_none());
        assert!(null.value.is_none());
        assert_eq!(set.value.map(ActionCount::get), Some(2));
        assert!(OptionalValue::<ActionCount>::default().value.is_none());
    }

    #[test]
    fn test_action_cost_key() {
        assert_eq!(action_cost_key("action", Some(ActionCount::Number(2))), "2");
        assert_eq!(action_cost_key("action", None), "1");
        assert_eq!(action_cost_key("reaction", None), "reaction");
        assert_eq!(action_cost_key("passive", Some(ActionCount::Number(1))), "passive");
    }
}
