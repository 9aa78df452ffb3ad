mod game_history;
mod pin;
mod player;

pub use game_history::*;
pub use pin::*;
pub use player::*;
