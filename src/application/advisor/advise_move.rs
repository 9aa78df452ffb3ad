use crate::domain::entities::{standing_numbers, PinState};
use crate::domain::services::{recommend, suggest_strategies};
use crate::domain::value_objects::{GameState, OptimalMove, StrategySuggestion};

/// Advice for the player about to throw
#[derive(Debug, Clone)]
pub struct Advice {
    pub player_name: String,
    pub pins: Vec<PinState>,
    pub optimal_move: OptimalMove,
    pub suggestions: Vec<StrategySuggestion>,
}

/// Advise the active player given the pins on the field
pub fn advise_move(state: &GameState, pins: Vec<PinState>) -> Result<Advice, AdviseMoveError> {
    if state.game_over {
        return Err(AdviseMoveError::GameOver);
    }
    let player = state.active_player().ok_or(AdviseMoveError::NoActivePlayer)?;

    let optimal_move = recommend(&pins, player.score);
    let suggestions = suggest_strategies(state, &standing_numbers(&pins));

    tracing::debug!(
        "Advice for {}: {} {:?}",
        player.name,
        optimal_move.kind.as_str(),
        optimal_move.target_pins
    );

    Ok(Advice {
        player_name: player.name.clone(),
        pins,
        optimal_move,
        suggestions,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum AdviseMoveError {
    #[error("Game is over")]
    GameOver,
    #[error("No active player")]
    NoActivePlayer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::apply_throw;
    use crate::domain::value_objects::MoveKind;

    #[test]
    fn test_advice_targets_active_player() {
        let state = GameState::new(&["Alice", "Bob"]).unwrap();
        let mut state = apply_throw(&state, 1).unwrap();
        state.players[1].score = 41;

        let pins = vec![PinState::standing(9, 100.0, 100.0), PinState::fallen(3)];
        let advice = advise_move(&state, pins).unwrap();

        assert_eq!(advice.player_name, "Bob");
        assert_eq!(advice.optimal_move.kind, MoveKind::DirectWin);
        assert_eq!(advice.optimal_move.current_score, 41);
        assert_eq!(advice.suggestions[0].pins.as_slice(), &[9]);
    }

    #[test]
    fn test_no_advice_after_game_over() {
        let mut state = GameState::new(&["Alice", "Bob"]).unwrap();
        state.game_over = true;
        assert!(matches!(
            advise_move(&state, Vec::new()),
            Err(AdviseMoveError::GameOver)
        ));
    }
}
