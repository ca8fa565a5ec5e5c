//! Recommendation assembly.
//!
//! Turns one journal submission into a [`Recommendation`]: mood and
//! sentiment (classified, or forced to calm in mock mode), a book from the
//! static library and up to `song_limit` songs from the configured
//! [`SongProvider`]. Every submission, mock or not, is appended to the
//! timeline before the recommendation is returned.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;

use crate::mood::{self, Mood, Sentiment};
use crate::songs::{NoopProvider, SongProvider, Track};
use crate::timeline::TimelineStore;

/// Text persisted for a submission that arrived without any.
pub const MOCK_PLACEHOLDER: &str = "(mock)";

lazy_static::lazy_static! {
    /// One book per mood.
    static ref BOOK_LIBRARY: HashMap<Mood, &'static str> = HashMap::from([
        (Mood::Joy, "The Happiness Advantage — Shawn Achor"),
        (Mood::Sadness, "Man's Search for Meaning — Viktor E. Frankl"),
        (Mood::Fear, "Feel the Fear and Do It Anyway — Susan Jeffers"),
        (Mood::Anger, "Meditations — Marcus Aurelius"),
        (Mood::Stressed, "Atomic Habits — James Clear"),
        (Mood::Neutral, "Deep Work — Cal Newport"),
        (Mood::Radiant, "The Alchemist — Paulo Coelho"),
        (Mood::Calm, "The Little Book of Hygge — Meik Wiking"),
    ]);
}

/// Book suggested for `mood`.
#[must_use]
pub fn book_for(mood: Mood) -> &'static str {
    BOOK_LIBRARY
        .get(&mood)
        .or_else(|| BOOK_LIBRARY.get(&Mood::Neutral))
        .copied()
        .unwrap_or_default()
}

/// Book suggested for a free-form mood label; unknown labels get the
/// neutral suggestion.
#[must_use]
pub fn book_for_label(label: &str) -> &'static str {
    book_for(label.parse().unwrap_or(Mood::Neutral))
}

/// What the user gets back for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub songs: Vec<Track>,
    pub book: String,
    pub mood_tag: Mood,
    pub sentiment: Sentiment,
}

/// Builds recommendations with a fixed song provider.
pub struct Recommender {
    provider: Box<dyn SongProvider>,
    song_limit: usize,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("provider", &self.provider.name())
            .field("song_limit", &self.song_limit)
            .finish()
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(Box::new(NoopProvider), crate::config::DEFAULT_SONG_LIMIT)
    }
}

impl Recommender {
    #[must_use]
    pub fn new(provider: Box<dyn SongProvider>, song_limit: usize) -> Self {
        Self { provider, song_limit }
    }

    /// Up to `limit` songs for `mood`. Provider failures are logged and
    /// produce an empty list.
    #[must_use]
    pub fn songs_for(&self, mood: Mood, limit: usize) -> Vec<Track> {
        match self.provider.tracks_for_mood(mood, limit) {
            Ok(mut tracks) => {
                tracks.truncate(limit);
                tracks
            }
            Err(e) => {
                warn!(
                    "Song provider `{}' failed for `{mood}': {e:#}",
                    self.provider.name()
                );
                Vec::new()
            }
        }
    }

    /// Build a recommendation for `text` and record it on the timeline.
    ///
    /// With `mock` set, or with blank text, classification is skipped and
    /// the result is calm/positive. Blank text is stored as
    /// [`MOCK_PLACEHOLDER`].
    ///
    /// # Errors
    ///
    /// Only a failed timeline append is an error.
    pub fn build(&self, timeline: &TimelineStore, text: &str, mock: bool) -> Result<Recommendation> {
        let blank = text.trim().is_empty();

        let (mood_tag, sentiment) = if mock || blank {
            (Mood::Calm, Sentiment::Positive)
        } else {
            let classification = mood::classify(text);
            (classification.mood, classification.sentiment)
        };

        let songs = self.songs_for(mood_tag, self.song_limit);
        let book = book_for(mood_tag).to_string();

        let stored_text = if blank { MOCK_PLACEHOLDER } else { text };
        timeline
            .append(stored_text, mood_tag)
            .context("Failed to record journal entry")?;

        info!(
            "Recommendation built: mood={mood_tag} sentiment={sentiment} mock={} songs={}",
            mock || blank,
            songs.len()
        );

        Ok(Recommendation {
            songs,
            book,
            mood_tag,
            sentiment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::songs::CatalogProvider;
    use crate::timeline::DEFAULT_LIMIT;
    use tempfile::TempDir;

    struct FailingProvider;

    impl SongProvider for FailingProvider {
        fn tracks_for_mood(&self, _mood: Mood, _limit: usize) -> Result<Vec<Track>> {
            anyhow::bail!("service unavailable")
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Ignores the limit, to check the recommender enforces it.
    struct GreedyProvider;

    impl SongProvider for GreedyProvider {
        fn tracks_for_mood(&self, mood: Mood, _limit: usize) -> Result<Vec<Track>> {
            Ok((0..20)
                .map(|i| Track {
                    title: format!("{mood} #{i}"),
                    artist: "Various".into(),
                    url: None,
                })
                .collect())
        }

        fn name(&self) -> &'static str {
            "greedy"
        }
    }

    fn timeline(dir: &TempDir) -> TimelineStore {
        TimelineStore::open(dir.path().join("mood_data.csv")).unwrap()
    }

    #[test]
    fn test_book_library_covers_every_mood() {
        for mood in Mood::ALL {
            assert!(!book_for(mood).is_empty(), "missing book for {mood}");
        }
        assert_eq!(book_for(Mood::Calm), "The Little Book of Hygge — Meik Wiking");
    }

    #[test]
    fn test_book_for_label() {
        assert_eq!(book_for_label("sad"), book_for(Mood::Sadness));
        assert_eq!(book_for_label("radiant"), "The Alchemist — Paulo Coelho");
        assert_eq!(book_for_label("mystery"), book_for(Mood::Neutral));
    }

    #[test]
    fn test_classified_submission() {
        let dir = TempDir::new().unwrap();
        let store = timeline(&dir);
        let rec = Recommender::default()
            .build(&store, "I feel so sad and alone", false)
            .unwrap();

        assert_eq!(rec.mood_tag, Mood::Sadness);
        assert_eq!(rec.sentiment, Sentiment::Negative);
        assert_eq!(rec.book, book_for(Mood::Sadness));
        assert!(rec.songs.is_empty());

        let entries = store.load(DEFAULT_LIMIT).unwrap();
        assert_eq!(entries[0].text, "I feel so sad and alone");
        assert_eq!(entries[0].mood, Mood::Sadness);
    }

    #[test]
    fn test_mock_forces_calm_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = timeline(&dir);
        let rec = Recommender::default()
            .build(&store, "furious and overwhelmed", true)
            .unwrap();

        assert_eq!(rec.mood_tag, Mood::Calm);
        assert_eq!(rec.sentiment, Sentiment::Positive);

        let entries = store.load(DEFAULT_LIMIT).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "furious and overwhelmed");
        assert_eq!(entries[0].mood, Mood::Calm);
    }

    #[test]
    fn test_blank_text_is_mock_with_placeholder() {
        let dir = TempDir::new().unwrap();
        let store = timeline(&dir);
        let recommender = Recommender::default();

        let rec = recommender.build(&store, "", false).unwrap();
        assert_eq!(rec.mood_tag, Mood::Calm);
        let rec = recommender.build(&store, "   \n ", false).unwrap();
        assert_eq!(rec.mood_tag, Mood::Calm);

        let entries = store.load(DEFAULT_LIMIT).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.text == MOCK_PLACEHOLDER));
    }

    #[test]
    fn test_provider_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let store = timeline(&dir);
        let recommender = Recommender::new(Box::new(FailingProvider), 5);

        let rec = recommender.build(&store, "so happy!", false).unwrap();
        assert_eq!(rec.mood_tag, Mood::Joy);
        assert!(rec.songs.is_empty());
        assert_eq!(store.load(DEFAULT_LIMIT).unwrap().len(), 1);
    }

    #[test]
    fn test_song_limit_enforced() {
        let recommender = Recommender::new(Box::new(GreedyProvider), 5);
        assert_eq!(recommender.songs_for(Mood::Joy, 5).len(), 5);
        assert_eq!(recommender.songs_for(Mood::Joy, 2).len(), 2);
    }

    #[test]
    fn test_catalog_songs_follow_mood() {
        let dir = TempDir::new().unwrap();
        let store = timeline(&dir);
        let catalog = CatalogProvider::from_json(
            r#"{"calm": [{"title": "Weightless", "artist": "Marconi Union"}]}"#,
        )
        .unwrap();
        let recommender = Recommender::new(Box::new(catalog), 5);

        let rec = recommender.build(&store, "", true).unwrap();
        assert_eq!(rec.songs.len(), 1);
        assert_eq!(rec.songs[0].title, "Weightless");

        let rec = recommender.build(&store, "so angry", false).unwrap();
        assert!(rec.songs.is_empty());
    }
}
