use std::sync::Arc;

use crate::application::game::GameSession;
use crate::domain::error::GameError;
use crate::domain::repositories::{GameRepository, RepositoryError, SettingsRepository};
use crate::domain::value_objects::GameState;

/// Start game input
pub struct StartGameInput {
    pub player_names: Vec<String>,
}

/// Start game use case
pub struct StartGame<G: GameRepository, S: SettingsRepository> {
    game_repo: Arc<G>,
    settings_repo: Arc<S>,
}

impl<G: GameRepository, S: SettingsRepository> StartGame<G, S> {
    pub fn new(game_repo: Arc<G>, settings_repo: Arc<S>) -> Self {
        Self {
            game_repo,
            settings_repo,
        }
    }

    pub async fn execute(&self, input: StartGameInput) -> Result<GameSession, StartGameError> {
        let state = GameState::new(input.player_names.as_slice())?;

        let settings = self.settings_repo.get_settings().await?.unwrap_or_default();
        if settings.auto_save_games {
            self.game_repo.save_current_game(&state).await?;
        }

        tracing::info!(
            "New game with {} players: {}",
            state.player_count(),
            input.player_names.join(", ")
        );

        Ok(GameSession::new(state))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartGameError {
    #[error("Invalid players: {0}")]
    InvalidPlayers(#[from] GameError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
