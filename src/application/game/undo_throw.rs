use std::sync::Arc;

use crate::application::game::GameSession;
use crate::domain::repositories::{GameRepository, RepositoryError, SettingsRepository};

/// Undo throw use case
pub struct UndoThrow<G: GameRepository, S: SettingsRepository> {
    game_repo: Arc<G>,
    settings_repo: Arc<S>,
}

impl<G: GameRepository, S: SettingsRepository> UndoThrow<G, S> {
    pub fn new(game_repo: Arc<G>, settings_repo: Arc<S>) -> Self {
        Self {
            game_repo,
            settings_repo,
        }
    }

    /// Returns false when there was nothing to undo
    pub async fn execute(&self, session: &mut GameSession) -> Result<bool, UndoThrowError> {
        let Some(previous) = session.previous() else {
            return Ok(false);
        };

        // An undone finishing throw makes the game resumable again; its
        // history entry stays
        let settings = self.settings_repo.get_settings().await?.unwrap_or_default();
        if settings.auto_save_games {
            self.game_repo.save_current_game(previous).await?;
        }
        session.undo();

        tracing::debug!(
            "Undid last throw, {} to throw",
            session
                .state()
                .current_player()
                .map(|p| p.name.as_str())
                .unwrap_or("nobody")
        );
        Ok(true)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UndoThrowError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
