use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "headlines")]
#[command(about = "Top-headlines reader with offline cache and bookmarks")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current top headlines, falling back to the cache when offline
    Fetch {
        /// Only show articles whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Same as fetch
    Refresh {
        /// Only show articles whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show the headlines saved by the last successful fetch
    Cached {
        /// Only show articles whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show bookmarked articles
    Bookmarks {
        /// Only show articles whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Bookmark or un-bookmark an article by its list number
    Toggle {
        /// 1-based position in the listing
        index: usize,

        /// Pick from the bookmark list instead of the cached headlines
        #[arg(long)]
        bookmarks: bool,

        /// Filter used when the listing was shown
        #[arg(short, long)]
        filter: Option<String>,
    },
}
