use async_trait::async_trait;

use crate::domain::entities::GameHistoryItem;
use crate::domain::repositories::RepositoryError;
use crate::domain::value_objects::GameState;

/// Game repository trait
#[async_trait]
pub trait GameRepository: Send + Sync {
    // ========== Finished games ==========

    /// Add a finished game to the history
    async fn save_to_history(&self, item: &GameHistoryItem) -> Result<(), RepositoryError>;

    /// All finished games, newest first
    async fn get_history(&self) -> Result<Vec<GameHistoryItem>, RepositoryError>;

    /// Remove every history entry, returns how many were removed
    async fn clear_history(&self) -> Result<u64, RepositoryError>;

    // ========== Game in progress ==========

    /// Save the running game so it can be resumed
    async fn save_current_game(&self, state: &GameState) -> Result<(), RepositoryError>;

    /// Load the saved running game, if any
    async fn get_current_game(&self) -> Result<Option<GameState>, RepositoryError>;

    /// Forget the saved running game
    async fn clear_current_game(&self) -> Result<(), RepositoryError>;
}
