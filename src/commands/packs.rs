//! Packs command - list and toggle the packs feeding each tab

use crate::{
    CompendiumError,
    browse::{Browser, SettingsForm},
    cli::PacksCommands,
    output,
    tabs::TabName,
};

type Result<T> = std::result::Result<T, CompendiumError>;

/// Execute the packs management command
///
/// # Errors
/// Returns an error for packs not registered with the tab or when the
/// settings cannot be persisted.
pub fn execute(browser: &mut Browser, command: &PacksCommands, quiet: bool) -> Result<()> {
    match command {
        PacksCommands::List { tab } => {
            list_packs(browser, *tab, quiet);
            Ok(())
        }
        PacksCommands::Enable { tab, collection } => toggle_pack(browser, *tab, collection, true, quiet),
        PacksCommands::Disable { tab, collection } => {
            toggle_pack(browser, *tab, collection, false, quiet)
        }
    }
}

fn list_packs(browser: &Browser, only: Option<TabName>, quiet: bool) {
    let tabs = only.map_or_else(|| TabName::ALL.to_vec(), |tab| vec![tab]);
    for tab in tabs {
        let Some(packs) = browser.pack_settings().packs(tab) else {
            continue;
        };
        if !quiet {
            println!("{tab}:");
        }
        for (collection, setting) in packs {
            println!("{}", output::pack_line(collection, &setting.name, setting.load, quiet));
        }
    }
}

fn toggle_pack(
    browser: &mut Browser,
    tab: TabName,
    collection: &str,
    load: bool,
    quiet: bool,
) -> Result<()> {
    let registered = browser
        .pack_settings()
        .packs(tab)
        .is_some_and(|packs| packs.contains_key(collection));
    if !registered {
        return Err(CompendiumError::InvalidInput(format!(
            "Pack '{collection}' does not feed the {tab} tab"
        )));
    }
    let form = SettingsForm {
        packs: vec![(tab, collection.to_string(), load)],
        ..SettingsForm::default()
    };
    browser.submit_settings(&form)?;
    if !quiet {
        let state = if load { "enabled" } else { "disabled" };
        println!("Pack {collection} {state} for the {tab} tab.");
    }
    Ok(())
}
