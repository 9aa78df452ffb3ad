mod game_repository;
mod settings_repository;

pub use game_repository::*;
pub use settings_repository::*;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Invalid stored data: {0}")]
    Serialization(String),
}
