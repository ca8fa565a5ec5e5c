//! Application wiring shared by the web server and the CLI.

use anyhow::{Context, Result};
use log::info;

use crate::config::RuntimeConfig;
use crate::recommend::Recommender;
use crate::songs::{self, SongProvider};
use crate::streak::StreakStore;
use crate::timeline::TimelineStore;

/// Everything a request needs: configuration, both stores and the recommender.
#[derive(Debug)]
pub struct App {
    pub config: RuntimeConfig,
    pub timeline: TimelineStore,
    pub streaks: StreakStore,
    pub recommender: Recommender,
}

impl App {
    /// Open both stores and pick the song provider named by `config`.
    pub fn open(config: RuntimeConfig) -> Result<Self> {
        let provider = songs::provider_from_config(&config)?;
        Self::with_provider(config, provider)
    }

    /// Open both stores with an explicit song provider.
    pub fn with_provider(config: RuntimeConfig, provider: Box<dyn SongProvider>) -> Result<Self> {
        let timeline = TimelineStore::open(config.mood_csv())
            .with_context(|| format!("Cannot use data directory {}", config.data_dir.display()))?;
        let streaks = StreakStore::open(config.streak_csv())
            .with_context(|| format!("Cannot use data directory {}", config.data_dir.display()))?;
        let recommender = Recommender::new(provider, config.song_limit);

        info!("Journal data in {}", config.data_dir.display());
        Ok(Self {
            config,
            timeline,
            streaks,
            recommender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::songs::NoopProvider;
    use tempfile::TempDir;

    #[test]
    fn test_open_initializes_both_files() {
        let dir = TempDir::new().unwrap();
        let config = RuntimeConfig::with_data_dir(dir.path().to_path_buf());
        let app = App::with_provider(config, Box::new(NoopProvider)).unwrap();

        let mood = std::fs::read_to_string(app.config.mood_csv()).unwrap();
        let streak = std::fs::read_to_string(app.config.streak_csv()).unwrap();
        assert_eq!(mood, "date,text,mood\n");
        assert_eq!(streak, "user,date\n");
    }

    #[test]
    fn test_open_fails_on_bad_catalog() {
        let dir = TempDir::new().unwrap();
        let mut config = RuntimeConfig::with_data_dir(dir.path().to_path_buf());
        config.catalog = Some(dir.path().join("nope.json"));
        assert!(App::open(config).is_err());
    }
}
