//! Song providers.
//!
//! Song suggestions come from an external collaborator behind the
//! [`SongProvider`] capability. The provider is picked once at startup by
//! [`provider_from_config`]: an offline JSON catalog when one is configured,
//! otherwise [`NoopProvider`], which always answers with no songs.
//!
//! ## Catalog Format
//!
//! ```json
//! {
//!   "joy":  [{ "title": "Here Comes the Sun", "artist": "The Beatles" }],
//!   "calm": [{ "title": "Weightless", "artist": "Marconi Union", "url": "https://…" }]
//! }
//! ```
//!
//! Keys are mood labels (`sad` is accepted for `sadness`). Moods missing from
//! the catalog get an empty list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::RuntimeConfig;
use crate::mood::Mood;

/// A suggested song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Source of song suggestions for a mood.
pub trait SongProvider: Send + Sync {
    /// Return at most `limit` tracks suited to `mood`.
    ///
    /// # Errors
    ///
    /// Implementations may fail; callers treat a failure as "no songs".
    fn tracks_for_mood(&self, mood: Mood, limit: usize) -> Result<Vec<Track>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Provider used when no song source is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl SongProvider for NoopProvider {
    fn tracks_for_mood(&self, _mood: Mood, _limit: usize) -> Result<Vec<Track>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Offline catalog of tracks grouped by mood.
#[derive(Debug, Default, Clone)]
pub struct CatalogProvider {
    tracks: HashMap<Mood, Vec<Track>>,
}

impl CatalogProvider {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read song catalog {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid song catalog {}", path.display()))
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: HashMap<Mood, Vec<Track>> =
            serde_json::from_str(raw).context("Catalog must map mood labels to track lists")?;
        let total: usize = parsed.values().map(Vec::len).sum();
        log::debug!("Loaded song catalog with {total} tracks across {} moods", parsed.len());
        Ok(Self { tracks: parsed })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SongProvider for CatalogProvider {
    fn tracks_for_mood(&self, mood: Mood, limit: usize) -> Result<Vec<Track>> {
        Ok(self
            .tracks
            .get(&mood)
            .map(|tracks| tracks.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}

/// Pick the song provider for this run.
///
/// # Errors
///
/// A configured catalog that can't be read or parsed is a startup error.
pub fn provider_from_config(config: &RuntimeConfig) -> Result<Box<dyn SongProvider>> {
    match &config.catalog {
        Some(path) => {
            let catalog = CatalogProvider::load(path)?;
            log::info!(
                "Using song catalog {} ({} tracks)",
                path.display(),
                catalog.len()
            );
            Ok(Box::new(catalog))
        }
        None => {
            log::info!("No song catalog configured; song suggestions disabled");
            Ok(Box::new(NoopProvider))
        }
    }
}
