use std::sync::Arc;

use crate::domain::repositories::{RepositoryError, SettingsRepository};
use crate::domain::value_objects::{AppSettings, SettingKey};

/// Update settings input
pub struct UpdateSettingsInput {
    pub key: SettingKey,
    pub enabled: bool,
}

/// Update settings use case
pub struct UpdateSettings<S: SettingsRepository> {
    settings_repo: Arc<S>,
}

impl<S: SettingsRepository> UpdateSettings<S> {
    pub fn new(settings_repo: Arc<S>) -> Self {
        Self { settings_repo }
    }

    pub async fn execute(&self, input: UpdateSettingsInput) -> Result<AppSettings, RepositoryError> {
        let current = self.settings_repo.get_settings().await?.unwrap_or_default();
        let updated = current.with(input.key, input.enabled);
        self.settings_repo.save_settings(&updated).await?;

        tracing::info!(
            "Setting {} is now {}",
            input.key.as_str(),
            if input.enabled { "on" } else { "off" }
        );
        Ok(updated)
    }
}
