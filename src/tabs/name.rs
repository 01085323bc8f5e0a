//! Names of the browser's data tabs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One content category of the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabName {
    Action,
    Bestiary,
    Equipment,
    Feat,
    Hazard,
    Spell,
}

impl TabName {
    /// All data tabs in navigation order
    pub const ALL: [Self; 6] = [
        Self::Action,
        Self::Bestiary,
        Self::Equipment,
        Self::Feat,
        Self::Hazard,
        Self::Spell,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Bestiary => "bestiary",
            Self::Equipment => "equipment",
            Self::Feat => "feat",
            Self::Hazard => "hazard",
            Self::Spell => "spell",
        }
    }

    /// Tabs only a game master may open
    #[must_use]
    pub const fn is_gm_only(self) -> bool {
        matches!(self, Self::Bestiary | Self::Hazard)
    }
}

impl fmt::Display for TabName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that names no data tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTabName(pub String);

impl fmt::Display for UnknownTabName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown tab name: {}", self.0)
    }
}

impl std::error::Error for UnknownTabName {}

impl FromStr for TabName {
    type Err = UnknownTabName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| UnknownTabName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for tab in TabName::ALL {
            assert_eq!(tab.as_str().parse::<TabName>().unwrap(), tab);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "kingmaker".parse::<TabName>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown tab name: kingmaker");
    }

    #[test]
    fn test_gm_only() {
        assert!(TabName::Bestiary.is_gm_only());
        assert!(TabName::Hazard.is_gm_only());
        assert!(!TabName::Spell.is_gm_only());
    }

    #[test]
    fn test_serde_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(TabName::Spell, 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"spell":1}"#);
    }
}
