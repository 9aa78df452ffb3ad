use async_trait::async_trait;

use crate::domain::repositories::RepositoryError;
use crate::domain::value_objects::AppSettings;

/// Settings repository trait
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored settings, None when never saved
    async fn get_settings(&self) -> Result<Option<AppSettings>, RepositoryError>;

    /// Save settings (create or update)
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), RepositoryError>;
}
