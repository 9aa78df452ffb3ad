/// Rule violations rejected by the game engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("At least one player is required")]
    NoPlayers,
    #[error("Player {index} has an empty name")]
    EmptyPlayerName { index: usize },
    #[error("Invalid throw value {0}: must be between 0 and 12")]
    InvalidThrow(u8),
    #[error("Invalid pin number {0}: pins are numbered 1 to 12")]
    InvalidPin(u8),
    #[error("Pin {0} listed more than once")]
    DuplicatePin(u8),
    #[error("Turn pointer {0} does not name a player")]
    PlayerIndexOutOfRange(usize),
    #[error("Game is already over")]
    GameAlreadyOver,
}
