use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::GameState;

/// Final score line of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub name: String,
    pub score: u8,
}

/// GameHistoryItem entity - summary of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryItem {
    pub id: String,
    /// Finish time, unix millis
    pub date: i64,
    pub players: Vec<String>,
    /// None for a game where everyone was eliminated
    pub winner: Option<String>,
    /// Rounds played
    pub rounds: u32,
    pub final_scores: Vec<FinalScore>,
}

impl GameHistoryItem {
    /// Summarize a game state
    pub fn from_state(state: &GameState) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: chrono::Utc::now().timestamp_millis(),
            players: state.players.iter().map(|p| p.name.clone()).collect(),
            winner: state.winner.as_ref().map(|w| w.name.clone()),
            // Round of the final throw; the state has already moved on
            rounds: state.history.last().map_or(state.round, |t| t.round),
            final_scores: state
                .players
                .iter()
                .map(|p| FinalScore {
                    name: p.name.clone(),
                    score: p.score,
                })
                .collect(),
        }
    }
}
