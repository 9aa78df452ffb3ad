use std::sync::Arc;

use crate::domain::repositories::{RepositoryError, SettingsRepository};
use crate::domain::value_objects::AppSettings;

/// Get settings use case
pub struct GetSettings<S: SettingsRepository> {
    settings_repo: Arc<S>,
}

impl<S: SettingsRepository> GetSettings<S> {
    pub fn new(settings_repo: Arc<S>) -> Self {
        Self { settings_repo }
    }

    /// Stored settings, or the defaults when none were saved
    pub async fn execute(&self) -> Result<AppSettings, RepositoryError> {
        Ok(self.settings_repo.get_settings().await?.unwrap_or_default())
    }
}
