use std::sync::Arc;

use crate::application::game::GameSession;
use crate::domain::repositories::{GameRepository, RepositoryError};

/// Resume game use case
pub struct ResumeGame<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> ResumeGame<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    /// Load the saved game in progress, if any
    pub async fn execute(&self) -> Result<Option<GameSession>, ResumeGameError> {
        let Some(state) = self.game_repo.get_current_game().await? else {
            return Ok(None);
        };

        if state.game_over {
            tracing::warn!("Saved game is already finished, discarding it");
            self.game_repo.clear_current_game().await?;
            return Ok(None);
        }

        tracing::info!("Resumed game in round {}", state.round);
        Ok(Some(GameSession::new(state)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResumeGameError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
