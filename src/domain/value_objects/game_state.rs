//! GameState - the value a game is carried in between throws
//!
//! A state is never mutated by the engine; each throw yields a new one.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Player;
use crate::domain::error::GameError;

/// Exact score that wins the game
pub const WINNING_SCORE: u8 = 50;
/// Score a player falls back to after overshooting
pub const BUST_RESET_SCORE: u8 = 25;
/// Misses in a row that eliminate a player
pub const MAX_CONSECUTIVE_MISSES: u8 = 3;
/// Highest point value of a single throw
pub const MAX_THROW_POINTS: u8 = 12;
/// Number of pins in a set
pub const PIN_COUNT: usize = 12;

/// One applied throw, kept for the scoresheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowRecord {
    pub player_id: String,
    pub player_name: String,
    /// Round the throw was made in
    pub round: u32,
    /// Points scored by the throw (0 = miss)
    pub score: u8,
    /// Player's total after the throw
    pub total_score: u8,
    pub timestamp: i64,
}

/// Result of the win detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub game_over: bool,
    pub winner: Option<Player>,
}

impl GameOutcome {
    pub fn in_progress() -> Self {
        Self {
            game_over: false,
            winner: None,
        }
    }

    pub fn won_by(player: &Player) -> Self {
        Self {
            game_over: true,
            winner: Some(player.clone()),
        }
    }

    pub fn draw() -> Self {
        Self {
            game_over: true,
            winner: None,
        }
    }
}

/// Game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Players in turn order
    pub players: Vec<Player>,
    pub current_player_index: usize,
    /// Starts at 1, bumped on every full pass over the players
    pub round: u32,
    pub game_over: bool,
    /// None while playing, and for good when everybody was eliminated
    pub winner: Option<Player>,
    #[serde(default)]
    pub history: Vec<ThrowRecord>,
}

impl GameState {
    /// Create a fresh game from player names, first player to throw
    pub fn new<S: AsRef<str>>(player_names: &[S]) -> Result<Self, GameError> {
        if player_names.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let players = player_names
            .iter()
            .enumerate()
            .map(|(index, name)| Player::new(index, name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            players,
            current_player_index: 0,
            round: 1,
            game_over: false,
            winner: None,
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Player at the turn pointer
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Player whose throw is awaited, None once the game is over
    pub fn active_player(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_active)
    }

    /// Players not yet eliminated
    pub fn remaining_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_eliminated)
    }

    pub fn remaining_player_count(&self) -> usize {
        self.remaining_players().count()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}
