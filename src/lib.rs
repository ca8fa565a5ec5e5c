//! Mood journal that suggests songs and a book for how you feel, and keeps
//! a daily puzzle streak leaderboard.
//!
//! Core modules:
//! - [`mood`] - Keyword-based mood classification
//! - [`timeline`] - Mood journal entries
//! - [`streak`] - Daily check-ins and the streak leaderboard
//! - [`recommend`] - Book library and recommendation assembly
//! - [`songs`] - Song provider capability (catalog or none)
//! - [`web`] - HTML pages and JSON API
//!
//! ### Supporting Modules
//!
//! - [`store`] - Single-writer append-only CSV files
//! - [`app`] - Wiring of stores, provider and configuration
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use feelbuddy::{app::App, config::RuntimeConfig};
//! use anyhow::Result;
//!
//! let config = RuntimeConfig::new()?;
//! let app = App::open(config)?;
//!
//! // Classify, suggest and record in one step
//! let rec = app.recommender.build(&app.timeline, "Nervous about tomorrow", false)?;
//! println!("{} / {}: {}", rec.mood_tag, rec.sentiment, rec.book);
//!
//! // Check in and look at the leaderboard
//! app.streaks.check_in("User")?;
//! for row in app.streaks.load_leaderboard(10)? {
//!     println!("{} - {} days", row.user, row.streak);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Classification
//!
//! Text is lower-cased and scanned against an ordered keyword table
//! (joy, sadness, fear, anger, stressed, calm). The mood of the *last*
//! matching keyword in table order wins; uplifting moods add to the score and
//! the rest subtract from it. See [`mood::classify`].
//!
//! ## Storage
//!
//! Two append-only CSV files in the data directory:
//!
//! - `mood_data.csv` - `date,text,mood`
//! - `streak_data.csv` - `user,date`
//!
//! Reads re-scan the whole file; malformed rows are errors.
//!
//! ## Error Handling
//!
//! All fallible functions return `anyhow::Result`. The only failure that is
//! recovered locally is the song provider: it degrades to an empty list.

pub mod app;
pub mod cli;
pub mod completion;
pub mod config;
pub mod mood;
pub mod recommend;
pub mod songs;
pub mod store;
pub mod streak;
pub mod timeline;
pub mod web;
