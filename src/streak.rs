//! # Daily Streaks
//!
//! Every finished puzzle is a check-in: one `user,date` row in
//! `streak_data.csv`. Streaks are never stored; they're recomputed from the
//! full check-in history on every read.
//!
//! ## Streak Rule
//!
//! A user's streak is the number of consecutive calendar days ending at their
//! most recent check-in. Several check-ins on the same day count once, and a
//! single missing day ends the run. Older runs before a gap are ignored, even
//! when they were longer.
//!
//! ```text
//! check-ins:  Mar 1  Mar 2  ----  Mar 4  Mar 5  Mar 6
//! streak:                                       3
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::store::CsvLog;

/// Header row of the streak file.
pub const HEADER: &[&str] = &["user", "date"];

/// Name recorded when a check-in arrives without one.
pub const DEFAULT_USER: &str = "User";

/// Number of leaderboard rows returned by default.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// One persisted check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub user: String,
    pub date: NaiveDate,
}

/// A user's current streak, as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub user: String,
    pub streak: u32,
}

/// Length of the run of consecutive days ending at the latest date in `dates`.
///
/// Returns 0 for an empty set.
#[must_use]
pub fn consecutive_days(dates: &BTreeSet<NaiveDate>) -> u32 {
    let Some(&latest) = dates.last() else {
        return 0;
    };

    let mut streak = 1;
    let mut day = latest;
    while let Some(previous) = day.pred_opt().filter(|d| dates.contains(d)) {
        streak += 1;
        day = previous;
    }
    streak
}

/// Group check-ins per user, in the order users first appear.
fn group_by_user(entries: &[StreakEntry]) -> Vec<(&str, BTreeSet<NaiveDate>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(&str, BTreeSet<NaiveDate>)> = Vec::new();

    for entry in entries {
        let user = normalize_user(&entry.user);
        let slot = *index.entry(user).or_insert_with(|| {
            grouped.push((user, BTreeSet::new()));
            grouped.len() - 1
        });
        grouped[slot].1.insert(entry.date);
    }
    grouped
}

/// Trimmed user name, or [`DEFAULT_USER`] when nothing is left.
#[must_use]
pub fn normalize_user(user: &str) -> &str {
    let trimmed = user.trim();
    if trimmed.is_empty() {
        DEFAULT_USER
    } else {
        trimmed
    }
}

/// Rank every user in `entries` by current streak, longest first.
///
/// Users with equal streaks keep the order in which they first checked in.
/// Only users with at least one check-in appear.
#[must_use]
pub fn rank(entries: &[StreakEntry], size: usize) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = group_by_user(entries)
        .into_iter()
        .map(|(user, dates)| LeaderboardRow {
            user: user.to_string(),
            streak: consecutive_days(&dates),
        })
        .collect();

    rows.sort_by(|a, b| b.streak.cmp(&a.streak));
    rows.truncate(size);
    rows
}

/// Append-only store of [`StreakEntry`] rows.
#[derive(Debug)]
pub struct StreakStore {
    log: CsvLog<StreakEntry>,
}

impl StreakStore {
    /// Open (or initialize) the streak file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let log = CsvLog::open(path, HEADER).context("Failed to open streak store")?;
        Ok(Self { log })
    }

    /// Record a check-in for `user` on `date`.
    pub fn append(&self, user: &str, date: NaiveDate) -> Result<StreakEntry> {
        let entry = StreakEntry {
            user: normalize_user(user).to_string(),
            date,
        };
        self.log
            .append(&entry)
            .context("Failed to append check-in")?;
        log::info!("Recorded check-in for `{}' on {}", entry.user, entry.date);
        Ok(entry)
    }

    /// Record a check-in for `user` on today's local date.
    pub fn check_in(&self, user: &str) -> Result<StreakEntry> {
        self.append(user, Local::now().date_naive())
    }

    /// Every check-in in file order.
    pub fn entries(&self) -> Result<Vec<StreakEntry>> {
        self.log.read_all().context("Failed to load check-ins")
    }

    /// Top `size` users by current streak.
    ///
    /// # Errors
    ///
    /// A row with an unparseable date fails the whole read.
    pub fn load_leaderboard(&self, size: usize) -> Result<Vec<LeaderboardRow>> {
        Ok(rank(&self.entries()?, size))
    }

    /// Current streak of a single user; 0 if they never checked in.
    pub fn streak_for(&self, user: &str) -> Result<u32> {
        let user = normalize_user(user);
        let dates: BTreeSet<NaiveDate> = self
            .entries()?
            .into_iter()
            .filter(|entry| normalize_user(&entry.user) == user)
            .map(|entry| entry.date)
            .collect();
        Ok(consecutive_days(&dates))
    }
}
