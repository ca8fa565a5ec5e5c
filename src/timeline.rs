//! Mood journal timeline.
//!
//! Every analysis appends one [`MoodEntry`] to `mood_data.csv`. The timeline
//! view reads them back newest first.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::mood::Mood;
use crate::store::CsvLog;

/// Header row of the timeline file.
pub const HEADER: &[&str] = &["date", "text", "mood"];

/// Timestamps are stored as text in this fixed-width layout, so string order
/// is chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Number of entries returned when the caller doesn't ask for a limit.
pub const DEFAULT_LIMIT: usize = 100;

/// One persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Local timestamp formatted with [`TIMESTAMP_FORMAT`].
    pub date: String,
    pub text: String,
    pub mood: Mood,
}

/// Replace embedded line breaks with spaces and trim the result.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Append-only store of [`MoodEntry`] rows.
#[derive(Debug)]
pub struct TimelineStore {
    log: CsvLog<MoodEntry>,
}

impl TimelineStore {
    /// Open (or initialize) the timeline file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let log = CsvLog::open(path, HEADER).context("Failed to open mood timeline")?;
        Ok(Self { log })
    }

    /// Record `text` with `mood`, stamped with the current local time.
    pub fn append(&self, text: &str, mood: Mood) -> Result<MoodEntry> {
        self.append_at(text, mood, Local::now().naive_local())
    }

    /// Record `text` with `mood` at an explicit timestamp.
    pub fn append_at(&self, text: &str, mood: Mood, timestamp: NaiveDateTime) -> Result<MoodEntry> {
        let entry = MoodEntry {
            date: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            text: sanitize_text(text),
            mood,
        };
        self.log
            .append(&entry)
            .context("Failed to append mood entry")?;
        log::debug!("Recorded `{}' entry at {}", entry.mood, entry.date);
        Ok(entry)
    }

    /// Return up to `limit` entries, most recent first.
    ///
    /// Entries sharing a timestamp keep reverse insertion order, so the entry
    /// appended last is always at the front.
    ///
    /// # Errors
    ///
    /// An unreadable file or a malformed row is returned as an error; there is
    /// no partial result.
    pub fn load(&self, limit: usize) -> Result<Vec<MoodEntry>> {
        let mut entries = self.log.read_all().context("Failed to load mood timeline")?;
        entries.reverse();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries.truncate(limit);
        Ok(entries)
    }
}
