use std::sync::Arc;

use crate::application::game::GameSession;
use crate::domain::entities::GameHistoryItem;
use crate::domain::error::GameError;
use crate::domain::repositories::{GameRepository, RepositoryError, SettingsRepository};
use crate::domain::services::{apply_throw, score_knocked_pins};
use crate::domain::value_objects::WINNING_SCORE;

/// What the thrower reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordThrowInput {
    /// Points already totalled (0 = miss)
    Points(u8),
    /// Numbers of the pins knocked down, scored by the pin rule
    KnockedPins(Vec<u8>),
}

/// Record throw output
#[derive(Debug, Clone)]
pub struct RecordThrowOutput {
    pub player_name: String,
    pub points: u8,
    pub total_score: u8,
    /// Thrower went over 50 and fell back to 25
    pub busted: bool,
    /// Thrower just reached three misses in a row
    pub eliminated: bool,
    pub game_over: bool,
    pub winner: Option<String>,
    /// Set when the game finished and was archived
    pub history_item: Option<GameHistoryItem>,
}

/// Record throw use case
pub struct RecordThrow<G: GameRepository, S: SettingsRepository> {
    game_repo: Arc<G>,
    settings_repo: Arc<S>,
}

impl<G: GameRepository, S: SettingsRepository> RecordThrow<G, S> {
    pub fn new(game_repo: Arc<G>, settings_repo: Arc<S>) -> Self {
        Self {
            game_repo,
            settings_repo,
        }
    }

    pub async fn execute(
        &self,
        session: &mut GameSession,
        input: RecordThrowInput,
    ) -> Result<RecordThrowOutput, RecordThrowError> {
        let points = match &input {
            RecordThrowInput::Points(points) => *points,
            RecordThrowInput::KnockedPins(pins) => score_knocked_pins(pins)?,
        };

        // The session only moves on once the new state is persisted
        let current = session.state();
        let thrower = current.current_player_index;
        let score_before = current
            .current_player()
            .map(|p| p.score)
            .unwrap_or_default();
        let next = apply_throw(current, points)?;
        let player = &next.players[thrower];

        let output = RecordThrowOutput {
            player_name: player.name.clone(),
            points,
            total_score: player.score,
            busted: score_before.saturating_add(points) > WINNING_SCORE,
            eliminated: player.is_eliminated,
            game_over: next.game_over,
            winner: next.winner.as_ref().map(|w| w.name.clone()),
            history_item: None,
        };

        let settings = self.settings_repo.get_settings().await?.unwrap_or_default();

        if next.game_over {
            let item = GameHistoryItem::from_state(&next);
            self.game_repo.save_to_history(&item).await?;
            self.game_repo.clear_current_game().await?;
            tracing::info!("Game {} archived after {} rounds", item.id, item.rounds);
            session.commit(next);
            return Ok(RecordThrowOutput {
                history_item: Some(item),
                ..output
            });
        }

        if settings.auto_save_games {
            self.game_repo.save_current_game(&next).await?;
        }
        session.commit(next);

        Ok(output)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordThrowError {
    #[error(transparent)]
    InvalidThrow(#[from] GameError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
