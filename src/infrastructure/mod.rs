pub mod app_state;
pub mod database;
pub mod services;
