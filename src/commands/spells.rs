//! Spells command - open the spell tab for a spellcasting entry

use super::search::print_results;
use crate::{
    CompendiumError,
    browse::{Browser, SpellTabOptions},
};

type Result<T> = std::result::Result<T, CompendiumError>;

/// Execute the spells command
///
/// # Errors
/// Returns an error if the spell tab cannot be initialized or opened.
pub fn execute(browser: &mut Browser, options: &SpellTabOptions, all: bool, quiet: bool) -> Result<()> {
    browser.open_spell_tab(options)?;
    if all {
        while browser.advance_result_limit()? {}
    }
    print_results(browser, quiet);
    Ok(())
}
