use serde::{Deserialize, Serialize};

use crate::domain::error::GameError;
use crate::domain::value_objects::MAX_CONSECUTIVE_MISSES;

/// Player entity - one participant of a game, in turn order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Current score (0-50)
    pub score: u8,
    /// Misses in a row (0-3)
    pub consecutive_misses: u8,
    /// Set after three misses in a row, never cleared
    pub is_eliminated: bool,
    /// Whether this player's throw is awaited
    pub is_active: bool,
}

impl Player {
    /// Create a new player at the given seat
    pub fn new(index: usize, name: &str) -> Result<Self, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName { index });
        }

        Ok(Self {
            id: format!("player-{}", index),
            name: name.to_string(),
            score: 0,
            consecutive_misses: 0,
            is_eliminated: false,
            is_active: index == 0,
        })
    }

    /// Record a miss, eliminating the player on the third in a row
    pub fn record_miss(&mut self) {
        self.consecutive_misses = self
            .consecutive_misses
            .saturating_add(1)
            .min(MAX_CONSECUTIVE_MISSES);
        if self.consecutive_misses >= MAX_CONSECUTIVE_MISSES {
            self.is_eliminated = true;
        }
    }

    /// Misses left before elimination
    pub fn misses_remaining(&self) -> u8 {
        MAX_CONSECUTIVE_MISSES.saturating_sub(self.consecutive_misses)
    }
}
