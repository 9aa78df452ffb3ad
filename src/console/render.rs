//! Plain-text rendering of game state and advice

use std::fmt::Write;

use crate::application::advisor::Advice;
use crate::application::game::RecordThrowOutput;
use crate::domain::entities::{standing_numbers, GameHistoryItem};
use crate::domain::services::player_ranking;
use crate::domain::value_objects::{AppSettings, GameState, SettingKey, MAX_CONSECUTIVE_MISSES};

pub const HELP: &str = "\
Commands:
  new <name>...          start a game (players throw in this order)
  throw <points>         record a throw worth 0-12 points
  miss                   record a miss
  pins [<n>...]          record the pins knocked down (one pin scores its number, several score their count)
  undo                   take back the last throw
  board                  show the scoreboard
  advise [<n>...]        suggest a target given the standing pins
  photo <path>           detect the standing pins in a photo and suggest a target
  resume                 continue the saved game
  history                list finished games
  clear-history          delete all finished games
  settings               show settings
  set <key> <on|off>     change a setting (sound, vibration, dark-mode, auto-save)
  help                   show this help
  quit                   leave";

/// Scoreboard in turn order, with the player to throw marked
pub fn scoreboard(state: &GameState) -> String {
    let width = state
        .players
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("Round {}\n", state.round);
    for player in &state.players {
        let marker = if player.is_active { ">" } else { " " };
        let status = if player.is_eliminated {
            "eliminated".to_string()
        } else if player.consecutive_misses > 0 {
            format!(
                "misses {}/{}",
                player.consecutive_misses, MAX_CONSECUTIVE_MISSES
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            " {} {:<width$}  {:>2}  {}",
            marker,
            player.name,
            player.score,
            status,
            width = width
        );
    }

    if state.game_over {
        out.push_str(&game_over_line(state));
    } else if let Some(player) = state.active_player() {
        let _ = write!(out, "{} to throw", player.name);
    }

    out.trim_end().to_string()
}

fn game_over_line(state: &GameState) -> String {
    match &state.winner {
        Some(winner) => format!("Game over: {} wins with {} points", winner.name, winner.score),
        None => "Game over: every player was eliminated".to_string(),
    }
}

/// One-line summary of a recorded throw followed by the board
pub fn throw_result(output: &RecordThrowOutput, state: &GameState) -> String {
    let mut out = if output.points == 0 {
        format!("{} misses", output.player_name)
    } else {
        format!(
            "{} scores {} ({} total)",
            output.player_name, output.points, output.total_score
        )
    };
    if output.busted {
        out.push_str(", over 50: back to 25");
    }
    if output.eliminated {
        out.push_str(", eliminated after three misses");
    }
    out.push('\n');
    out.push_str(&scoreboard(state));

    if output.game_over {
        out.push_str("\nFinal ranking:");
        for (place, player) in player_ranking(&state.players).iter().enumerate() {
            let _ = write!(out, "\n  {}. {} ({})", place + 1, player.name, player.score);
        }
    }
    out
}

pub fn advice(advice: &Advice) -> String {
    let mv = &advice.optimal_move;
    let standing = standing_numbers(&advice.pins);

    let mut out = format!("{} has {} points.\n", advice.player_name, mv.current_score);
    if standing.is_empty() {
        out.push_str("Standing pins: none\n");
    } else {
        let _ = writeln!(out, "Standing pins: {}", join(&standing));
    }
    let _ = writeln!(out, "{}", mv.recommendation);
    let _ = writeln!(out, "{}", mv.strategy_explanation);
    if mv.has_target() {
        let _ = writeln!(
            out,
            "Expected score {}, win chance {:.0}%",
            mv.expected_score,
            mv.win_probability * 100.0
        );
    }

    if !advice.suggestions.is_empty() {
        out.push_str("Other options:\n");
        for s in &advice.suggestions {
            let _ = write!(
                out,
                "  [{}] pins {}: {} ({})",
                s.priority.as_str(),
                join(&s.pins),
                s.reason,
                s.difficulty.as_str()
            );
            if let Some(new_score) = s.expected_outcome.new_score {
                let _ = write!(out, ", reaches {}", new_score);
            }
            out.push('\n');
        }
    }

    out.trim_end().to_string()
}

pub fn history(items: &[GameHistoryItem]) -> String {
    if items.is_empty() {
        return "No finished games yet".to_string();
    }

    items
        .iter()
        .map(|item| {
            let date = chrono::DateTime::from_timestamp_millis(item.date)
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown date".to_string());
            let winner = item.winner.as_deref().unwrap_or("nobody");
            let scores = item
                .final_scores
                .iter()
                .map(|s| format!("{} {}", s.name, s.score))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "{}  winner: {}, {} rounds ({})",
                date, winner, item.rounds, scores
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn settings(settings: &AppSettings) -> String {
    let on_off = |b: bool| if b { "on" } else { "off" };
    [
        (SettingKey::Sound, settings.sound_enabled),
        (SettingKey::Vibration, settings.vibration_enabled),
        (SettingKey::DarkMode, settings.dark_mode),
        (SettingKey::AutoSave, settings.auto_save_games),
    ]
    .iter()
    .map(|(key, value)| format!("{:<10} {}", key.as_str(), on_off(*value)))
    .collect::<Vec<_>>()
    .join("\n")
}

fn join(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
