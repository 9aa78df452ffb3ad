mod advise_move;
mod analyze_photo;

pub use advise_move::*;
pub use analyze_photo::*;
