//! Sources command - list and toggle publication sources

use crate::{
    CompendiumError,
    browse::{Browser, SettingsForm},
    cli::SourcesCommands,
    output,
};

type Result<T> = std::result::Result<T, CompendiumError>;

/// Execute the sources management command
///
/// # Errors
/// Returns an error for unknown source slugs or when the settings cannot be
/// persisted.
pub fn execute(browser: &mut Browser, command: &SourcesCommands, quiet: bool) -> Result<()> {
    match command {
        SourcesCommands::List => {
            list_sources(browser, quiet);
            Ok(())
        }
        SourcesCommands::Enable { slugs } => toggle_sources(browser, slugs, true, quiet),
        SourcesCommands::Disable { slugs } => toggle_sources(browser, slugs, false, quiet),
        SourcesCommands::Flags {
            ignore_as_gm,
            show_empty,
            show_unknown,
        } => {
            let form = SettingsForm {
                ignore_as_gm: *ignore_as_gm,
                show_empty_sources: *show_empty,
                show_unknown_sources: *show_unknown,
                ..SettingsForm::default()
            };
            if form.is_empty() {
                return Err(CompendiumError::InvalidInput(
                    "No flag given. Use --ignore-as-gm, --show-empty or --show-unknown.".into(),
                ));
            }
            browser.submit_settings(&form)?;
            if !quiet {
                let settings = browser.sources().settings();
                println!("ignore as GM:        {}", settings.ignore_as_gm);
                println!("show empty sources:  {}", settings.show_empty_sources);
                println!("show unknown sources: {}", settings.show_unknown_sources);
            }
            Ok(())
        }
        SourcesCommands::Reset => {
            let found = browser.hard_reset_sources()?;
            if !quiet {
                println!("Rescanned packs, found {found} source(s).");
            }
            Ok(())
        }
    }
}

fn list_sources(browser: &Browser, quiet: bool) {
    let sources = browser.sources().sorted_sources();
    if sources.is_empty() {
        if !quiet {
            println!("No sources found.");
        }
        return;
    }
    if !quiet {
        println!("Sources:");
    }
    for (slug, setting) in sources {
        println!("{}", output::source_line(slug, &setting.name, setting.load, quiet));
    }
}

fn toggle_sources(browser: &mut Browser, slugs: &[String], load: bool, quiet: bool) -> Result<()> {
    let known = &browser.sources().settings().sources;
    if let Some(unknown) = slugs.iter().find(|slug| !known.contains_key(slug.as_str())) {
        return Err(CompendiumError::InvalidInput(format!("Unknown source '{unknown}'")));
    }
    let form = SettingsForm {
        sources: slugs.iter().map(|slug| (slug.clone(), load)).collect(),
        ..SettingsForm::default()
    };
    browser.submit_settings(&form)?;
    if !quiet {
        let state = if load { "enabled" } else { "disabled" };
        println!("{} source(s) {state}.", slugs.len());
    }
    Ok(())
}
