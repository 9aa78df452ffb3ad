mod app_settings;
mod game_state;
mod optimal_move;

pub use app_settings::*;
pub use game_state::*;
pub use optimal_move::*;
