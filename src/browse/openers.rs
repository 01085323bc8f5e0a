//! Category-specific openers
//!
//! Convenience entry points that translate semantic parameters (a spell
//! tradition, a maximum rank, a set of action types) into a pre-populated
//! filter and open the matching tab with it. Values the tab does not offer
//! are skipped.

use super::error::BrowserError;
use super::navigation::OpenOptions;
use super::session::Browser;
use crate::filters::FilterState;
use crate::tabs::TabName;
use crate::tabs::spell::SpellCategory;

/// How the spellcasting entry that opens the spell tab casts its spells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellEntryKind {
    Prepared,
    Spontaneous,
    Innate,
    Focus,
    Ritual,
}

/// Parameters for [`Browser::open_spell_tab`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellTabOptions {
    /// Magical tradition to restrict to, e.g. `arcane`
    pub tradition: Option<String>,
    /// Highest spell rank to include
    pub max_rank: Option<u8>,
    pub category: Option<SpellCategory>,
    pub entry_kind: Option<SpellEntryKind>,
}

/// Parameters for [`Browser::open_action_tab`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTabOptions {
    pub types: Vec<String>,
    pub categories: Vec<String>,
    pub traits: Vec<String>,
}

fn select_checkbox(filter: &mut FilterState, key: &str, value: &str) -> Result<(), BrowserError> {
    if !filter.checkbox_mut(key)?.select(value) {
        tracing::debug!(group = key, value, "Option not offered, skipping");
    }
    Ok(())
}

/// Filter for a spell tab opened from a spellcasting entry
fn spell_filter(mut filter: FilterState, options: &SpellTabOptions) -> Result<FilterState, BrowserError> {
    let category = match options.entry_kind {
        Some(SpellEntryKind::Focus) => Some(SpellCategory::Focus),
        Some(SpellEntryKind::Ritual) => Some(SpellCategory::Ritual),
        _ => options.category,
    };
    if let Some(category) = category {
        select_checkbox(&mut filter, "category", category.as_str())?;
    }

    // Focus spells and rituals ignore the caster's tradition
    let uses_tradition = !matches!(category, Some(SpellCategory::Focus | SpellCategory::Ritual));
    if uses_tradition && let Some(tradition) = &options.tradition {
        select_checkbox(&mut filter, "traditions", tradition)?;
    }

    if category != Some(SpellCategory::Cantrip)
        && let Some(max_rank) = options.max_rank
    {
        for rank in 1..=max_rank {
            select_checkbox(&mut filter, "rank", &rank.to_string())?;
        }
    }
    Ok(filter)
}

fn action_filter(mut filter: FilterState, options: &ActionTabOptions) -> Result<FilterState, BrowserError> {
    for value in &options.types {
        select_checkbox(&mut filter, "action_type", value)?;
    }
    for value in &options.categories {
        select_checkbox(&mut filter, "category", value)?;
    }
    let traits = filter.multiselect_mut("traits")?;
    for value in &options.traits {
        if traits.select(value, false).is_err() {
            tracing::debug!(value, "Trait not offered, skipping");
        }
    }
    Ok(filter)
}

impl Browser {
    /// Open the spell tab filtered for a spellcasting entry
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the tab cannot be initialized or opened.
    pub fn open_spell_tab(&mut self, options: &SpellTabOptions) -> Result<(), BrowserError> {
        let filter = spell_filter(self.default_filter(TabName::Spell)?, options)?;
        self.open_tab(TabName::Spell.as_str(), OpenOptions::with_filter(filter))
    }

    /// Open the action tab filtered by type, category and traits
    ///
    /// # Errors
    ///
    /// Returns `BrowserError` if the tab cannot be initialized or opened.
    pub fn open_action_tab(&mut self, options: &ActionTabOptions) -> Result<(), BrowserError> {
        let filter = action_filter(self.default_filter(TabName::Action)?, options)?;
        self.open_tab(TabName::Action.as_str(), OpenOptions::with_filter(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{CheckboxGroup, FilterOption, SortOrder};

    fn spell_state() -> FilterState {
        let mut category = CheckboxGroup::new("category", "Category");
        category.set_options(
            ["cantrip", "focus", "ritual", "spell"]
                .map(|v| FilterOption::new(v, v))
                .to_vec(),
            true,
        );
        let mut rank = CheckboxGroup::new("rank", "Rank");
        rank.set_options(
            (1..=4).map(|r| FilterOption::new(r.to_string(), r.to_string())).collect(),
            true,
        );
        let mut traditions = CheckboxGroup::new("traditions", "Traditions");
        traditions.set_options(
            vec![FilterOption::new("arcane", "Arcane"), FilterOption::new("divine", "Divine")],
            false,
        );
        FilterState::new(SortOrder::new(Vec::new()))
            .with_checkbox("category", category)
            .with_checkbox("rank", rank)
            .with_checkbox("traditions", traditions)
    }

    #[test]
    fn test_prepared_caster() {
        let options = SpellTabOptions {
            tradition: Some("arcane".to_string()),
            max_rank: Some(3),
            entry_kind: Some(SpellEntryKind::Prepared),
            ..SpellTabOptions::default()
        };
        let filter = spell_filter(spell_state(), &options).unwrap();
        assert_eq!(filter.checkboxes["rank"].selected, vec!["1", "2", "3"]);
        assert_eq!(filter.checkboxes["traditions"].selected, vec!["arcane"]);
        assert!(filter.checkboxes["category"].selected.is_empty());
    }

    #[test]
    fn test_focus_entry_ignores_tradition() {
        let options = SpellTabOptions {
            tradition: Some("divine".to_string()),
            entry_kind: Some(SpellEntryKind::Focus),
            ..SpellTabOptions::default()
        };
        let filter = spell_filter(spell_state(), &options).unwrap();
        assert_eq!(filter.checkboxes["category"].selected, vec!["focus"]);
        assert!(filter.checkboxes["traditions"].selected.is_empty());
    }

    #[test]
    fn test_cantrips_skip_ranks() {
        let options = SpellTabOptions {
            max_rank: Some(2),
            category: Some(SpellCategory::Cantrip),
            ..SpellTabOptions::default()
        };
        let filter = spell_filter(spell_state(), &options).unwrap();
        assert_eq!(filter.checkboxes["category"].selected, vec!["cantrip"]);
        assert!(filter.checkboxes["rank"].selected.is_empty());
    }

    #[test]
    fn test_rank_beyond_offered_is_skipped() {
        let options = SpellTabOptions {
            max_rank: Some(6),
            ..SpellTabOptions::default()
        };
        let filter = spell_filter(spell_state(), &options).unwrap();
        assert_eq!(filter.checkboxes["rank"].selected.len(), 4);
    }

    #[test]
    fn test_missing_group_is_an_error() {
        let options = ActionTabOptions {
            types: vec!["action".to_string()],
            ..ActionTabOptions::default()
        };
        let state = FilterState::new(SortOrder::new(Vec::new()));
        assert!(matches!(
            action_filter(state, &options),
            Err(BrowserError::Filter(_))
        ));
    }
}
