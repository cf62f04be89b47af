// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// AnkiConnect endpoint, overrides the configured one
    #[arg(short, long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search cards containing the given text
    Search {
        /// Text to search for
        #[arg(value_name = "TEXT")]
        text: String,

        /// Profile whose rules to apply (defaults to the active profile)
        #[arg(short, long, value_name = "PROFILE")]
        profile: Option<String>,

        /// Output results as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Show results in the browser
        #[arg(long)]
        html: bool,
    },

    /// Print the combined Anki query for a search
    Query {
        /// Text to search for
        #[arg(value_name = "TEXT")]
        text: String,

        /// Profile whose rules to apply (defaults to the active profile)
        #[arg(short, long, value_name = "PROFILE")]
        profile: Option<String>,
    },

    /// Open a card in Anki's card browser
    Open {
        /// Card ID to open
        #[arg(value_name = "CARD_ID")]
        card_id: i64,
    },

    /// List deck names
    Decks,

    /// List note type names
    Models,

    /// List the field names of a note type
    Fields {
        /// Note type name
        #[arg(value_name = "MODEL")]
        model: String,
    },

    /// List configured profiles and their rules
    Profiles,

    /// Check that AnkiConnect is reachable and print its API version
    Status,

    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
