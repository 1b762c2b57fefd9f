use clap::builder::RangedI64ValueParser;
use clap::{Parser, Subcommand};
use repo_dashboard::config::{
    DEFAULT_OWNER, DEFAULT_REPO, DEFAULT_SNAPSHOT_PATH, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repo-dashboard",
    version,
    about = "Repository statistics for a static dashboard"
)]
pub struct Cli {
    /// Repository owner (user or organization)
    #[arg(long, global = true, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repository name
    #[arg(long, global = true, default_value = DEFAULT_REPO)]
    pub repo: String,

    /// API token; overrides GITHUB_TOKEN / TOKEN
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch live stats and print them as JSON
    Fetch {
        /// Include every commit from the last N days instead of the latest 10
        #[arg(long, value_parser = window_days())]
        days: Option<u32>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Fetch stats with a commit window and write a snapshot file
    Snapshot {
        /// Destination file
        #[arg(long, short, default_value = DEFAULT_SNAPSHOT_PATH)]
        output: PathBuf,

        /// Commit window in days
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = window_days())]
        days: u32,
    },

    /// Print a text summary from a snapshot file or a live fetch
    Summary {
        /// Read this snapshot instead of calling the API
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Days of commit activity to chart
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = window_days())]
        days: u32,
    },
}

/// Day counts between 1 and [`MAX_WINDOW_DAYS`].
fn window_days() -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS))
}
