mod game_repo;
mod settings_repo;

pub use game_repo::*;
pub use settings_repo::*;
