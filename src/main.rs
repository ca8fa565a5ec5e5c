//! # FeelBuddy
//!
//! Mood journal web app: write how you feel, get songs and a book that fit,
//! and keep a daily puzzle streak going.
//!
//! ## Usage
//!
//! ```bash
//! # Run the web journal
//! feelbuddy serve --catalog songs.json
//!
//! # Journal from the terminal
//! feelbuddy analyze "Worried about the interview"
//! feelbuddy timeline --limit 10
//!
//! # Streaks
//! feelbuddy checkin --user alice
//! feelbuddy leaderboard
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use feelbuddy::{app::App, cli, completion, config::RuntimeConfig, recommend::Recommendation};
use log::{debug, info};

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_recommendation(rec: &Recommendation) {
    println!("Mood:      {}", rec.mood_tag);
    println!("Sentiment: {}", rec.sentiment);
    println!("Book:      {}", rec.book);
    if rec.songs.is_empty() {
        println!("Songs:     (none)");
    } else {
        println!("Songs:");
        for (i, track) in rec.songs.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, track.title, track.artist);
        }
    }
}

/// Main entry point for FeelBuddy.
///
/// # Logging
///
/// Controlled via `RUST_LOG`, defaulting to `info`:
/// - `RUST_LOG=debug feelbuddy serve` - Enable debug logging
/// - `RUST_LOG=feelbuddy::mood=trace feelbuddy analyze "..."` - Module-specific logging
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    debug!("Parsed arguments: {args:?}");

    match args.command {
        cli::Command::Serve { bind, catalog, user } => {
            let mut config = RuntimeConfig::resolve(args.data_dir)?;
            config.bind = bind;
            config.catalog = catalog;
            config.default_user = user;

            let app = App::open(config)?;
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(feelbuddy::web::serve(app))?;
        }
        cli::Command::Analyze { text, mock, catalog, json } => {
            let mut config = RuntimeConfig::resolve(args.data_dir)?;
            config.catalog = catalog;

            let app = App::open(config)?;
            let rec = app.recommender.build(&app.timeline, &text, mock)?;
            if json {
                print_json(&rec)?;
            } else {
                print_recommendation(&rec);
            }
        }
        cli::Command::Timeline { limit, json } => {
            let app = App::open(RuntimeConfig::resolve(args.data_dir)?)?;
            let entries = app.timeline.load(limit)?;
            if json {
                print_json(&entries)?;
            } else if entries.is_empty() {
                println!("No journal entries yet.");
            } else {
                for entry in &entries {
                    println!("{}  {:<9} {}", entry.date, entry.mood.as_str(), entry.text);
                }
            }
        }
        cli::Command::Leaderboard { json } => {
            let app = App::open(RuntimeConfig::resolve(args.data_dir)?)?;
            let rows = app.streaks.load_leaderboard(app.config.leaderboard_size)?;
            if json {
                print_json(&rows)?;
            } else if rows.is_empty() {
                println!("No check-ins yet. Play the daily puzzle to start a streak.");
            } else {
                for (rank, row) in rows.iter().enumerate() {
                    println!("{:>2}. {:<20} {} day(s)", rank + 1, row.user, row.streak);
                }
            }
        }
        cli::Command::Checkin { user } => {
            let app = App::open(RuntimeConfig::resolve(args.data_dir)?)?;
            let entry = app.streaks.check_in(&user)?;
            let streak = app.streaks.streak_for(&entry.user)?;
            info!("Check-in stored in {}", app.config.streak_csv().display());
            println!("{} checked in on {}. Current streak: {streak} day(s)", entry.user, entry.date);
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
