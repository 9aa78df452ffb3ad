mod history;
mod record_throw;
mod resume_game;
mod session;
mod start_game;
mod undo_throw;

pub use history::*;
pub use record_throw::*;
pub use resume_game::*;
pub use session::*;
pub use start_game::*;
pub use undo_throw::*;
