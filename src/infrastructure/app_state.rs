use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::infrastructure::database;
use crate::infrastructure::database::repositories::{SqliteGameRepository, SqliteSettingsRepository};
use crate::infrastructure::services::{DetectorMode, MockPinDetector, PinDetector};

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/molkky.db";

/// Runtime configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub detector_mode: DetectorMode,
    pub detector_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            detector_mode: DetectorMode::default(),
            detector_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_PATH"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        // Ensure path has sqlite: prefix
        let database_url = if db_path.starts_with("sqlite:") {
            db_path
        } else {
            format!("sqlite:{}", db_path)
        };

        let detector_mode = match lookup("MOLKKY_DETECTOR_MODE") {
            Some(value) => DetectorMode::from_str(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown detector mode '{}', using random", value);
                DetectorMode::Random
            }),
            None => DetectorMode::Random,
        };

        let detector_seed = lookup("MOLKKY_DETECTOR_SEED").and_then(|s| match s.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!("Ignoring invalid MOLKKY_DETECTOR_SEED '{}'", s);
                None
            }
        });

        Self {
            database_url,
            detector_mode,
            detector_seed,
        }
    }
}

/// Application state shared by the command handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Finished games and the game in progress
    pub game_repo: Arc<SqliteGameRepository>,

    /// User preferences
    pub settings_repo: Arc<SqliteSettingsRepository>,

    /// Photo analysis
    pub detector: Arc<dyn PinDetector>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // SQLite creates the file but not its directory
        if let Some(dir) = file_dir(&config.database_url) {
            tokio::fs::create_dir_all(dir).await?;
        }

        tracing::info!("Connecting to database: {}", config.database_url);
        let db = database::connect(&config.database_url).await?;

        tracing::info!(
            "Pin detector: placeholder ({} mode{})",
            config.detector_mode.as_str(),
            if config.detector_seed.is_some() { ", seeded" } else { "" }
        );
        let detector = MockPinDetector::new(config.detector_mode, config.detector_seed);

        Ok(Self::with_detector(db, Arc::new(detector)))
    }

    /// Wire repositories around an open pool
    pub fn with_detector(db: SqlitePool, detector: Arc<dyn PinDetector>) -> Self {
        Self {
            game_repo: Arc::new(SqliteGameRepository::new(db.clone())),
            settings_repo: Arc::new(SqliteSettingsRepository::new(db.clone())),
            db,
            detector,
        }
    }
}

/// Parent directory of a file-backed database URL
fn file_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite:")?;
    let path = path.trim_start_matches("//");
    let path = path.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}
