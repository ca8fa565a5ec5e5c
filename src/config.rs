//! # Configuration Module
//!
//! Runtime settings and data directory management for FeelBuddy.
//!
//! ## Data Storage
//!
//! Both CSV files live in one data directory. Unless overridden with
//! `--data-dir` (or `FEELBUDDY_DATA_DIR`), that's the platform data directory:
//! - Linux: `~/.local/share/feelbuddy/`
//! - macOS: `~/Library/Application Support/feelbuddy/`
//! - Windows: `%APPDATA%\feelbuddy\`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::{streak, timeline};

/// File name of the mood timeline inside the data directory.
pub const MOOD_CSV: &str = "mood_data.csv";
/// File name of the streak check-ins inside the data directory.
pub const STREAK_CSV: &str = "streak_data.csv";

/// Default address for `feelbuddy serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Number of songs requested per recommendation.
pub const DEFAULT_SONG_LIMIT: usize = 5;

/// Returns the platform-appropriate data directory for FeelBuddy, creating it
/// if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The feelbuddy subdirectory cannot be created due to permissions
///
/// # Examples
///
/// ```no_run
/// use feelbuddy::config::get_data_dir;
///
/// let data_dir = get_data_dir()?;
/// println!("Journal location: {}", data_dir.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Pass --data-dir or set FEELBUDDY_DATA_DIR."
        )
    })?;

    let app_dir = data_dir.join("feelbuddy");
    ensure_dir(&app_dir)?;
    Ok(app_dir)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| {
        format!(
            "Failed to create FeelBuddy data directory at {}. Please check file permissions.",
            dir.display()
        )
    })
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory holding the CSV files
    pub data_dir: PathBuf,
    /// Address the web server listens on
    pub bind: SocketAddr,
    /// Optional JSON song catalog; without one no songs are suggested
    pub catalog: Option<PathBuf>,
    /// User credited for check-ins from the puzzle page
    pub default_user: String,
    /// Maximum timeline entries shown
    pub timeline_limit: usize,
    /// Maximum leaderboard rows shown
    pub leaderboard_size: usize,
    /// Songs requested per recommendation
    pub song_limit: usize,
}

impl RuntimeConfig {
    /// Configuration rooted at the platform data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_data_dir(get_data_dir()?))
    }

    /// Configuration rooted at an explicit data directory; every other
    /// setting takes its default.
    #[must_use]
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            catalog: None,
            default_user: streak::DEFAULT_USER.to_string(),
            timeline_limit: timeline::DEFAULT_LIMIT,
            leaderboard_size: streak::DEFAULT_LEADERBOARD_SIZE,
            song_limit: DEFAULT_SONG_LIMIT,
        }
    }

    /// Resolve the data directory: explicit path if given, platform default
    /// otherwise. The directory is created either way.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        match data_dir {
            Some(dir) => {
                ensure_dir(&dir)?;
                Ok(Self::with_data_dir(dir))
            }
            None => Self::new(),
        }
    }

    #[must_use]
    pub fn mood_csv(&self) -> PathBuf {
        self.data_dir.join(MOOD_CSV)
    }

    #[must_use]
    pub fn streak_csv(&self) -> PathBuf {
        self.data_dir.join(STREAK_CSV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_data_dir_creates_directory() {
        let dir = get_data_dir().expect("data dir");
        assert!(dir.exists());
        assert!(dir.is_dir());
        assert_eq!(dir.file_name().unwrap(), "feelbuddy");
    }

    #[test]
    fn test_get_data_dir_consistent_results() {
        let first = get_data_dir().expect("First call should succeed");
        let second = get_data_dir().expect("Second call should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::with_data_dir(PathBuf::from("/tmp/feelbuddy-test"));
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.default_user, "User");
        assert_eq!(config.timeline_limit, 100);
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.song_limit, 5);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_csv_paths() {
        let config = RuntimeConfig::with_data_dir(PathBuf::from("/data"));
        assert_eq!(config.mood_csv(), PathBuf::from("/data/mood_data.csv"));
        assert_eq!(config.streak_csv(), PathBuf::from("/data/streak_data.csv"));
    }

    #[test]
    fn test_resolve_creates_explicit_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("journal");
        let config = RuntimeConfig::resolve(Some(dir.clone())).unwrap();
        assert_eq!(config.data_dir, dir);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_config_serializes() {
        let config = RuntimeConfig::with_data_dir(PathBuf::from("/data"));
        let json = serde_json::to_string(&config).unwrap();
        let back: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bind, config.bind);
        assert_eq!(back.data_dir, config.data_dir);
    }
}
