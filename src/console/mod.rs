//! Line-oriented console front end
//!
//! Reads one command per line, runs the matching use case and renders the
//! result as plain text.

pub mod commands;
pub mod handlers;
pub mod render;

pub use commands::{parse, Command, CommandError};
pub use handlers::{Console, Reply};
