//! Rolltable command - export a filtered result as a roll table

use super::search::open_filtered;
use crate::{CompendiumError, browse::Browser, cli::FilterArgs, output, tabs::TabName};
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, CompendiumError>;

/// Execute the rolltable command
///
/// Nothing is written when the result exceeds the configured ceiling; the
/// browser reports that as a warning.
///
/// # Errors
/// Returns an error if the tab cannot be opened, the filter is invalid or the
/// output file cannot be written.
pub fn execute(
    browser: &mut Browser,
    tab: TabName,
    name: &str,
    filter: &FilterArgs,
    output_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    open_filtered(browser, tab, filter)?;
    let Some(id) = browser.create_roll_table(name)? else {
        return Ok(());
    };
    let table = browser
        .roll_tables()
        .get(&id)
        .ok_or_else(|| crate::host::HostError::TableNotFound(id.clone()))?;

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&table)
            .map_err(|e| CompendiumError::InvalidInput(format!("Failed to serialize roll table: {e}")))?;
        fs::write(path, json)?;
        if !quiet {
            println!("Wrote roll table '{}' ({}) to {}", table.name, table.formula, path.display());
        }
    } else {
        if !quiet {
            println!("{} ({})", table.name, table.formula);
        }
        for result in &table.results {
            println!("{}", output::table_result_line(result));
        }
    }
    Ok(())
}
