//! # Command-Line Interface Module
//!
//! Defines the FeelBuddy command line with Clap derive macros.
//!
//! ## Commands
//!
//! - `serve`: Run the web journal
//! - `analyze`: Classify a journal entry, record it and print suggestions
//! - `timeline`: Show recent journal entries
//! - `leaderboard`: Show the streak leaderboard
//! - `checkin`: Record today's puzzle check-in
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! feelbuddy serve --bind 0.0.0.0:8080
//! feelbuddy analyze "Tired but grateful for the weekend"
//! feelbuddy --data-dir ./data leaderboard
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "feelbuddy")]
#[command(about = "FeelBuddy: mood journal with song & book suggestions and daily streaks")]
#[command(version)]
pub struct Args {
    /// Directory holding mood_data.csv and streak_data.csv
    ///
    /// Defaults to the platform data directory (e.g. ~/.local/share/feelbuddy).
    #[arg(long, global = true, env = "FEELBUDDY_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web journal
    ///
    /// Serves the journal page, the daily puzzle and the JSON API.
    Serve {
        /// Address to listen on
        #[arg(long, env = "FEELBUDDY_BIND", default_value = crate::config::DEFAULT_BIND)]
        bind: SocketAddr,

        /// JSON song catalog used for song suggestions
        ///
        /// Maps mood labels to lists of {title, artist, url} objects. Without
        /// a catalog, recommendations carry no songs.
        #[arg(long, env = "FEELBUDDY_CATALOG", value_hint = clap::ValueHint::FilePath)]
        catalog: Option<PathBuf>,

        /// User credited for puzzle check-ins
        #[arg(long, default_value = crate::streak::DEFAULT_USER)]
        user: String,
    },

    /// Classify a journal entry and print suggestions
    ///
    /// The entry is recorded on the timeline, exactly like a web submission.
    Analyze {
        /// Journal text; leave empty for a mock entry
        #[arg(default_value = "")]
        text: String,

        /// Skip classification and answer calm/positive
        #[arg(long)]
        mock: bool,

        /// JSON song catalog used for song suggestions
        #[arg(long, env = "FEELBUDDY_CATALOG", value_hint = clap::ValueHint::FilePath)]
        catalog: Option<PathBuf>,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent journal entries, newest first
    Timeline {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = crate::timeline::DEFAULT_LIMIT)]
        limit: usize,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the streak leaderboard
    Leaderboard {
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record today's puzzle check-in
    Checkin {
        /// Who played
        #[arg(short, long, default_value = crate::streak::DEFAULT_USER)]
        user: String,
    },

    /// Generate shell completions
    ///
    /// Usage: feelbuddy completion bash > ~/.local/share/bash-completion/completions/feelbuddy
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
