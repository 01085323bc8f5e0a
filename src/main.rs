//! Compendium CLI application entry point
//!
//! Loads packs from a directory of JSON files, builds the browser over them
//! and runs one command.
//!
//! # Usage
//!
//! ```bash
//! # Spells matching both clauses, sorted by rank
//! compendium --packs-dir ./packs search spell "fire, bolt" --sort rank
//!
//! # Uncommon feats between level 1 and 4 with the fighter trait
//! compendium search feat -c rarity=uncommon -r level=1..4 -t fighter
//!
//! # Spells for a prepared arcane caster up to rank 3
//! compendium spells --tradition arcane --max-rank 3 --entry prepared
//!
//! # GM-only tabs need game master rights
//! compendium --gm rolltable hazard --name "Traps" -o traps.json
//!
//! # Hide a publication source
//! compendium sources disable homebrew-grimoire
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/compendium/config.toml` on Linux) and created with defaults on
//! first run. Pack and source toggles persist in `settings.json` next to it.
//! Set `RUST_LOG` to control log output, which goes to stderr.

use compendium::{
    CompendiumError,
    browse::{Browser, BrowserServices, MemoryRollTables, SpellTabOptions},
    cli::{Cli, Commands},
    commands,
    config::BrowserConfig,
    host::{EnglishLocalizer, LogNotifier, LogProgress, MemoryRegistry},
    settings::{JsonFileSettings, SettingsRepository},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, CompendiumError>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a browser over the configured pack directory and settings file
fn open_browser(config: BrowserConfig) -> Result<Browser> {
    let packs_dir = config.packs_dir.clone().ok_or_else(|| {
        CompendiumError::InvalidInput(
            "No pack directory configured. Set packs_dir in the config or pass --packs-dir.".into(),
        )
    })?;
    let settings_path = match &config.settings_file {
        Some(path) => path.clone(),
        None => JsonFileSettings::default_path()?,
    };

    let services = BrowserServices {
        registry: Box::new(MemoryRegistry::load_dir(&packs_dir)?),
        localizer: Box::new(EnglishLocalizer),
        notifier: Arc::new(LogNotifier),
        progress: Box::new(LogProgress),
        roll_tables: Box::new(MemoryRollTables::new()),
        settings: SettingsRepository::new(Box::new(JsonFileSettings::open(settings_path)?)),
    };

    let mut browser = Browser::new(services, config)?;
    browser.init_compendium_list()?;
    Ok(browser)
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse_args();
    let mut config = match &cli.config {
        Some(path) => BrowserConfig::load_from(path)?,
        None => BrowserConfig::load()?,
    };
    if cli.gm {
        config.game_master = true;
    }
    if let Some(dir) = &cli.packs_dir {
        config.packs_dir = Some(dir.clone());
    }
    if let Commands::Search { limit: Some(limit), .. } = &cli.command {
        config.result_limit_step = *limit;
    }

    let quiet = cli.quiet;
    let mut browser = open_browser(config)?;

    match &cli.command {
        Commands::Search { tab, filter, all, .. } => {
            commands::search(&mut browser, *tab, filter, *all, quiet)?;
        }
        Commands::Spells {
            tradition,
            max_rank,
            category,
            entry,
            all,
        } => {
            let options = SpellTabOptions {
                tradition: tradition.clone(),
                max_rank: *max_rank,
                category: category.map(Into::into),
                entry_kind: entry.map(Into::into),
            };
            commands::spells(&mut browser, &options, *all, quiet)?;
        }
        Commands::Rolltable {
            tab,
            name,
            filter,
            output,
        } => {
            commands::rolltable(&mut browser, *tab, name, filter, output.as_deref(), quiet)?;
        }
        Commands::Sources { command } => {
            commands::sources(&mut browser, command, quiet)?;
        }
        Commands::Packs { command } => {
            commands::packs(&mut browser, command, quiet)?;
        }
    }

    Ok(())
}
