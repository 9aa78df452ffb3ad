use std::path::PathBuf;

use crate::domain::value_objects::SettingKey;

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a game with these players, in throwing order
    New(Vec<String>),
    Throw(u8),
    Miss,
    /// Pins knocked down by the throw
    Pins(Vec<u8>),
    Undo,
    Board,
    /// Pins still standing
    Advise(Vec<u8>),
    Photo(PathBuf),
    Resume,
    History,
    ClearHistory,
    Settings,
    Set { key: SettingKey, enabled: bool },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("Unknown setting '{0}' (sound, vibration, dark-mode, auto-save)")]
    UnknownSetting(String),
    #[error("Expected on or off, got '{0}'")]
    InvalidToggle(String),
}

/// Parse one input line; blank lines yield None
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "new" => {
            if args.is_empty() {
                return Err(CommandError::Usage("new <name> [<name>...]"));
            }
            Command::New(args.iter().map(|s| s.to_string()).collect())
        }
        "throw" | "t" => match args.as_slice() {
            [points] => Command::Throw(parse_number(points)?),
            _ => return Err(CommandError::Usage("throw <points>")),
        },
        "miss" | "m" => Command::Miss,
        "pins" | "p" => Command::Pins(parse_numbers(&args)?),
        "undo" | "u" => Command::Undo,
        "board" | "b" => Command::Board,
        "advise" | "a" => Command::Advise(parse_numbers(&args)?),
        "photo" => match args.as_slice() {
            [] => return Err(CommandError::Usage("photo <path>")),
            // Paths may contain spaces
            _ => Command::Photo(PathBuf::from(args.join(" "))),
        },
        "resume" => Command::Resume,
        "history" => Command::History,
        "clear-history" => Command::ClearHistory,
        "settings" => Command::Settings,
        "set" => match args.as_slice() {
            [key, value] => Command::Set {
                key: SettingKey::from_str(&key.to_ascii_lowercase())
                    .ok_or_else(|| CommandError::UnknownSetting(key.to_string()))?,
                enabled: parse_toggle(value)?,
            },
            _ => return Err(CommandError::Usage("set <key> <on|off>")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };

    Ok(Some(command))
}

fn parse_number(s: &str) -> Result<u8, CommandError> {
    s.parse()
        .map_err(|_| CommandError::InvalidNumber(s.to_string()))
}

fn parse_numbers(args: &[&str]) -> Result<Vec<u8>, CommandError> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .filter(|s| !s.is_empty())
        .map(parse_number)
        .collect()
}

fn parse_toggle(s: &str) -> Result<bool, CommandError> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CommandError::InvalidToggle(s.to_string())),
    }
}
