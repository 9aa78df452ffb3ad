use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::repositories::{RepositoryError, SettingsRepository};
use crate::domain::value_objects::AppSettings;
use crate::infrastructure::database::kv_store::{self, APP_SETTINGS_KEY};

/// SQLite implementation of SettingsRepository
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, RepositoryError> {
        let Some(json) = kv_store::get_value(&self.pool, APP_SETTINGS_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                tracing::warn!("Failed to parse settings, using defaults: {}", e);
                Ok(None)
            }
        }
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        kv_store::set_value(&self.pool, APP_SETTINGS_KEY, &json).await
    }
}
