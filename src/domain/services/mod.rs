mod game_service;
mod move_advisor;
mod strategy_engine;

pub use game_service::*;
pub use move_advisor::*;
pub use strategy_engine::*;
