//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for the compendium browser using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **search**: Filter and list the entries of one tab
//! - **spells**: Open the spell tab the way a spellcasting entry would
//! - **rolltable**: Export a filtered result as a roll table
//! - **sources**: List and toggle publication sources
//! - **packs**: List and toggle the packs feeding each tab
//!
//! Global flags select the pack directory, the config file and whether the
//! session runs with game master rights.

use crate::browse::SpellEntryKind;
use crate::filters::SortDirection;
use crate::tabs::TabName;
use crate::tabs::spell::SpellCategory;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sort direction argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => Self::Asc,
            DirectionArg::Desc => Self::Desc,
        }
    }
}

/// Spell category argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    Cantrip,
    Focus,
    Ritual,
    Spell,
}

impl From<CategoryArg> for SpellCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Cantrip => Self::Cantrip,
            CategoryArg::Focus => Self::Focus,
            CategoryArg::Ritual => Self::Ritual,
            CategoryArg::Spell => Self::Spell,
        }
    }
}

/// Spellcasting entry argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryArg {
    Prepared,
    Spontaneous,
    Innate,
    Focus,
    Ritual,
}

impl From<EntryArg> for SpellEntryKind {
    fn from(arg: EntryArg) -> Self {
        match arg {
            EntryArg::Prepared => Self::Prepared,
            EntryArg::Spontaneous => Self::Spontaneous,
            EntryArg::Innate => Self::Innate,
            EntryArg::Focus => Self::Focus,
            EntryArg::Ritual => Self::Ritual,
        }
    }
}

/// Filter arguments shared by every command that queries a tab
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text query; comma-separated clauses must all match
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Select a checkbox option (e.g. `rarity=rare`)
    #[arg(short = 'c', long = "check", value_name = "GROUP=VALUE", num_args = 0..)]
    pub checks: Vec<String>,

    /// Require a trait; prefix with `!` to exclude it
    #[arg(short = 't', long = "trait", value_name = "TRAIT", num_args = 0..)]
    pub traits: Vec<String>,

    /// Match entries with ANY of the required traits (default is ALL)
    #[arg(long = "any-trait")]
    pub any_trait: bool,

    /// Narrow a numeric range (e.g. `level=1..4`)
    #[arg(short = 'r', long = "range", value_name = "GROUP=LO..HI", num_args = 0..)]
    pub ranges: Vec<String>,

    /// Sort key (e.g. `name`, `level`)
    #[arg(short = 's', long = "sort", value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(short = 'd', long = "direction", value_enum, requires = "sort")]
    pub direction: Option<DirectionArg>,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "compendium")]
#[command(about = "Faceted browser for tabletop rule compendiums", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Run with game master rights (overrides config)
    #[arg(long = "gm", global = true)]
    pub gm: bool,

    /// Directory of pack JSON files (overrides config)
    #[arg(long = "packs-dir", value_name = "DIR", global = true)]
    pub packs_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Filter and list the entries of a tab
    #[command(visible_alias = "s")]
    Search {
        /// Tab to search (action, bestiary, equipment, feat, hazard, spell)
        tab: TabName,

        #[command(flatten)]
        filter: FilterArgs,

        /// Number of results to show (defaults to the configured page size)
        #[arg(short = 'n', long = "limit", value_name = "N", conflicts_with = "all")]
        limit: Option<usize>,

        /// Show every matching result
        #[arg(short = 'a', long = "all")]
        all: bool,
    },

    /// Browse spells available to a spellcasting entry
    Spells {
        /// Magical tradition (arcane, divine, occult, primal)
        #[arg(long = "tradition")]
        tradition: Option<String>,

        /// Highest spell rank
        #[arg(long = "max-rank", value_parser = clap::value_parser!(u8).range(1..=10))]
        max_rank: Option<u8>,

        #[arg(long = "category", value_enum)]
        category: Option<CategoryArg>,

        /// How the entry casts its spells
        #[arg(long = "entry", value_enum)]
        entry: Option<EntryArg>,

        /// Show every matching spell
        #[arg(short = 'a', long = "all")]
        all: bool,
    },

    /// Export the filtered result of a tab as a roll table
    #[command(visible_alias = "rt")]
    Rolltable {
        /// Tab to export from
        tab: TabName,

        /// Name of the roll table
        #[arg(long = "name", value_name = "NAME")]
        name: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Write the table as JSON to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Manage publication sources
    Sources {
        #[command(subcommand)]
        command: SourcesCommands,
    },

    /// Manage the packs feeding each tab
    Packs {
        #[command(subcommand)]
        command: PacksCommands,
    },
}

/// Source management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SourcesCommands {
    /// List known sources and whether they load
    #[command(visible_alias = "ls")]
    List,

    /// Load entries of these sources
    Enable {
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// Hide entries of these sources
    Disable {
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// Change source visibility flags
    Flags {
        /// Bypass source filtering as game master
        #[arg(long = "ignore-as-gm")]
        ignore_as_gm: Option<bool>,

        /// Show entries without a source
        #[arg(long = "show-empty")]
        show_empty: Option<bool>,

        /// Show entries of sources never toggled
        #[arg(long = "show-unknown")]
        show_unknown: Option<bool>,
    },

    /// Forget all sources and rescan every pack
    Reset,
}

/// Pack management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PacksCommands {
    /// List packs per tab
    #[command(visible_alias = "ls")]
    List {
        /// Only this tab
        tab: Option<TabName>,
    },

    /// Load a pack into a tab
    Enable { tab: TabName, collection: String },

    /// Stop loading a pack into a tab
    Disable { tab: TabName, collection: String },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
