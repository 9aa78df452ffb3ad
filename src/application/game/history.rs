use std::sync::Arc;

use crate::domain::entities::GameHistoryItem;
use crate::domain::repositories::{GameRepository, RepositoryError};

/// Get history use case
pub struct GetHistory<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> GetHistory<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    /// Finished games, newest first
    pub async fn execute(&self) -> Result<Vec<GameHistoryItem>, RepositoryError> {
        self.game_repo.get_history().await
    }
}

/// Clear history use case
pub struct ClearHistory<G: GameRepository> {
    game_repo: Arc<G>,
}

impl<G: GameRepository> ClearHistory<G> {
    pub fn new(game_repo: Arc<G>) -> Self {
        Self { game_repo }
    }

    /// Returns the number of entries removed
    pub async fn execute(&self) -> Result<u64, RepositoryError> {
        let removed = self.game_repo.clear_history().await?;
        tracing::info!("Cleared {} history entries", removed);
        Ok(removed)
    }
}
