use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docsmith", version, about = "Fetch tagged documentation repositories and render them to HTML")]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "docsmith.toml")]
    pub config: PathBuf,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured sources and their tags
    #[command(visible_alias = "ls")]
    List,

    /// Fetch, validate and render sources into the destination tree
    Sync {
        /// Sync only the named source; all sources when omitted
        source: Option<String>,
    },
}
