use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::entities::GameHistoryItem;
use crate::domain::repositories::{GameRepository, RepositoryError};
use crate::domain::value_objects::GameState;
use crate::infrastructure::database::kv_store::{self, CURRENT_GAME_KEY};

/// SQLite implementation of GameRepository
pub struct SqliteGameRepository {
    pool: SqlitePool,
}

impl SqliteGameRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for SqliteGameRepository {
    async fn save_to_history(&self, item: &GameHistoryItem) -> Result<(), RepositoryError> {
        let item_json =
            serde_json::to_string(item).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        sqlx::query("INSERT INTO game_history (id, finished_at, item_json) VALUES (?, ?, ?)")
            .bind(&item.id)
            .bind(item.date)
            .bind(item_json)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::debug!("Saved game {} to history", item.id);
        Ok(())
    }

    async fn get_history(&self) -> Result<Vec<GameHistoryItem>, RepositoryError> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT item_json FROM game_history ORDER BY finished_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        // A corrupt entry is skipped rather than hiding the whole history
        let items = rows
            .iter()
            .filter_map(|json| match serde_json::from_str(json) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping unreadable history entry: {}", e);
                    None
                }
            })
            .collect();

        Ok(items)
    }

    async fn clear_history(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM game_history")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn save_current_game(&self, state: &GameState) -> Result<(), RepositoryError> {
        let state_json = state
            .to_json()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        kv_store::set_value(&self.pool, CURRENT_GAME_KEY, &state_json).await
    }

    async fn get_current_game(&self) -> Result<Option<GameState>, RepositoryError> {
        match kv_store::get_value(&self.pool, CURRENT_GAME_KEY).await? {
            Some(json) => match GameState::from_json(&json) {
                Ok(state) => Ok(Some(state)),
                Err(e) => {
                    tracing::error!("Failed to parse saved game JSON: {}", e);
                    Err(RepositoryError::Serialization(format!(
                        "Invalid game state JSON: {}",
                        e
                    )))
                }
            },
            None => Ok(None),
        }
    }

    async fn clear_current_game(&self) -> Result<(), RepositoryError> {
        kv_store::remove_value(&self.pool, CURRENT_GAME_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::apply_throw;
    use crate::infrastructure::database::connect;

    async fn repo() -> SqliteGameRepository {
        let pool = connect("sqlite::memory:").await.unwrap();
        SqliteGameRepository::new(pool)
    }

    fn item(winner: &str, date: i64) -> GameHistoryItem {
        let mut state = GameState::new(&["Alice", "Bob"]).unwrap();
        state.round = 7;
        let mut item = GameHistoryItem::from_state(&state);
        item.winner = Some(winner.to_string());
        item.date = date;
        item
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let repo = repo().await;
        repo.save_to_history(&item("Alice", 1_000)).await.unwrap();
        repo.save_to_history(&item("Bob", 2_000)).await.unwrap();

        let history = repo.get_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].winner.as_deref(), Some("Bob"));
        assert_eq!(history[1].winner.as_deref(), Some("Alice"));
        assert_eq!(history[1].rounds, 7);
        assert_eq!(history[1].players, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let repo = repo().await;
        repo.save_to_history(&item("Alice", 1_000)).await.unwrap();
        repo.save_to_history(&item("Alice", 1_500)).await.unwrap();

        assert_eq!(repo.clear_history().await.unwrap(), 2);
        assert!(repo.get_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_current_game_roundtrip() {
        let repo = repo().await;
        assert!(repo.get_current_game().await.unwrap().is_none());

        let state = GameState::new(&["Alice", "Bob"]).unwrap();
        let state = apply_throw(&state, 8).unwrap();
        repo.save_current_game(&state).await.unwrap();

        let state = apply_throw(&state, 3).unwrap();
        repo.save_current_game(&state).await.unwrap();

        let loaded = repo.get_current_game().await.unwrap().unwrap();
        assert_eq!(loaded, state);

        repo.clear_current_game().await.unwrap();
        assert!(repo.get_current_game().await.unwrap().is_none());
    }
}
