//! Output formatting for CLI display
//!
//! This module provides utilities for formatting entries, sources, packs and
//! roll-table rows in the CLI.

use crate::browse::TableResult;
use crate::tabs::SearchEntry;
use colored::Colorize;

/// Facets shown after an entry's name with their prefix, first present wins
const SUMMARY_FACETS: &[(&str, &str)] = &[("rank_label", "rank"), ("level", "level"), ("action_type", "")];

/// Format a search entry for display
#[must_use]
pub fn entry_line(entry: &SearchEntry, quiet: bool) -> String {
    if quiet {
        return entry.name.clone();
    }
    let summary = SUMMARY_FACETS
        .iter()
        .find_map(|(facet, prefix)| {
            let value = entry.list(facet).into_iter().next()?;
            Some(format!("{prefix} {value}").trim_start().to_string())
        })
        .unwrap_or_default();
    let rarity = entry
        .list("rarity")
        .into_iter()
        .next()
        .filter(|r| r != "common")
        .map(|r| format!(" ({r})"))
        .unwrap_or_default();
    let source = entry.list("source").into_iter().next().unwrap_or_default();

    format!(
        "  {}{} {} {}",
        entry.name.bold(),
        rarity.yellow(),
        summary.cyan(),
        source.dimmed()
    )
    .trim_end()
    .to_string()
}

/// Summary line under a result list
#[must_use]
pub fn results_footer(shown: usize, total: usize) -> String {
    if shown < total {
        format!("Showing {shown} of {total} results (use --all to see every result)")
    } else {
        format!("{total} result(s)")
    }
}

fn load_marker(load: bool) -> String {
    if load {
        "on ".green().to_string()
    } else {
        "off".red().to_string()
    }
}

/// Format a source with its load flag
#[must_use]
pub fn source_line(slug: &str, name: &str, load: bool, quiet: bool) -> String {
    if quiet {
        slug.to_string()
    } else {
        format!("  [{}] {} ({})", load_marker(load), name, slug.dimmed())
    }
}

/// Format a pack with its load flag
#[must_use]
pub fn pack_line(collection: &str, name: &str, load: bool, quiet: bool) -> String {
    if quiet {
        collection.to_string()
    } else {
        format!("  [{}] {} ({})", load_marker(load), name, collection.dimmed())
    }
}

/// Format one roll-table row
#[must_use]
pub fn table_result_line(result: &TableResult) -> String {
    let [low, high] = result.range;
    let range = if low == high {
        low.to_string()
    } else {
        format!("{low}-{high}")
    };
    format!("  {:>4}  {}", range.cyan(), result.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry() -> SearchEntry {
        let mut entry = SearchEntry {
            uuid: "Compendium.pf2e.spells-srd.Item.s1".to_string(),
            collection: "pf2e.spells-srd".to_string(),
            id: "s1".to_string(),
            name: "Fireball".to_string(),
            original_name: None,
            doc_type: "spell".to_string(),
            img: String::new(),
            facets: BTreeMap::new(),
        };
        entry.set_text("rank_label", "3");
        entry.set_text("rarity", "common");
        entry
    }

    #[test]
    fn test_quiet_entry_is_name_only() {
        assert_eq!(entry_line(&entry(), true), "Fireball");
    }

    #[test]
    fn test_entry_summary() {
        colored::control::set_override(false);
        let line = entry_line(&entry(), false);
        assert!(line.contains("Fireball"));
        assert!(line.contains("rank 3"));
        assert!(!line.contains("common"));
    }

    #[test]
    fn test_footer() {
        assert_eq!(
            results_footer(2, 5),
            "Showing 2 of 5 results (use --all to see every result)"
        );
        assert_eq!(results_footer(5, 5), "5 result(s)");
    }

    #[test]
    fn test_quiet_source_line() {
        assert_eq!(source_line("player-core", "Player Core", true, true), "player-core");
    }
}
