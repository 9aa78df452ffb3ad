mod get_settings;
mod update_settings;

pub use get_settings::*;
pub use update_settings::*;
