pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedsync")]
#[command(about = "Polls RSS/Atom feeds and stores selected item fields", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/feedsync/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the config file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the sync loop until interrupted
    Run {
        /// Pause between passes (e.g., "500ms", "5s", "1m"); defaults to the config value
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// Run a single sync pass and exit
    Sync,
    /// Register a feed source
    Add {
        /// Absolute URL of the feed
        url: String,
        /// Projection rule, e.g. "Title=t,GUID=id,Link"
        rule: String,
    },
    /// List registered sources
    Sources,
    /// List stored news
    News {
        /// Only show news whose title contains this text
        #[arg(short, long)]
        title: Option<String>,

        #[arg(long, default_value_t = 0)]
        offset: usize,

        #[arg(long, default_value_t = 20)]
        count: usize,
    },
    /// Show the stored payload of one news item
    Show {
        id: i64,
    },
}
