pub mod advisor;
pub mod game;
pub mod settings;
