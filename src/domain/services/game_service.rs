//! Game service - Core game rules for Mölkky
//!
//! Turn rotation, throw scoring and win detection. Every function here is a
//! pure transformation; `apply_throw` hands back a new `GameState`.

use smallvec::SmallVec;

use crate::domain::entities::{is_valid_pin, Player};
use crate::domain::error::GameError;
use crate::domain::value_objects::{
    GameOutcome, GameState, ThrowRecord, BUST_RESET_SCORE, MAX_THROW_POINTS, WINNING_SCORE,
};

/// Index of the player who throws after the current one
///
/// Scans forward circularly, skipping eliminated players. When everyone is
/// eliminated the scan gives up after one full cycle and returns the first
/// candidate; the win detector deals with that case.
pub fn next_player_index(state: &GameState) -> usize {
    next_index(&state.players, state.current_player_index)
}

fn next_index(players: &[Player], current: usize) -> usize {
    let count = players.len();
    if count == 0 {
        return 0;
    }

    // A turn pointer read back from storage may be out of range
    let mut next = (current % count + 1) % count;
    let mut attempts = 0;
    while players[next].is_eliminated && attempts < count {
        next = (next + 1) % count;
        attempts += 1;
    }
    next
}

/// Apply one throw worth `points` (0 = miss) to the active player
pub fn apply_throw(state: &GameState, points: u8) -> Result<GameState, GameError> {
    if points > MAX_THROW_POINTS {
        return Err(GameError::InvalidThrow(points));
    }
    if state.game_over {
        return Err(GameError::GameAlreadyOver);
    }

    let current = state.current_player_index;
    let mut next_state = state.clone();
    let player = next_state
        .players
        .get_mut(current)
        .ok_or(GameError::PlayerIndexOutOfRange(current))?;

    if points == 0 {
        player.record_miss();
        if player.is_eliminated {
            tracing::info!("{} eliminated after three misses in a row", player.name);
        }
    } else {
        player.consecutive_misses = 0;
        let tentative = player.score.saturating_add(points);
        if tentative > WINNING_SCORE {
            tracing::debug!("{} busts at {}, back to {}", player.name, tentative, BUST_RESET_SCORE);
            player.score = BUST_RESET_SCORE;
        } else {
            player.score = tentative;
        }
    }

    let record = ThrowRecord {
        player_id: player.id.clone(),
        player_name: player.name.clone(),
        round: state.round,
        score: points,
        total_score: player.score,
        timestamp: chrono::Utc::now().timestamp_millis(),
    };
    next_state.history.push(record);

    for p in next_state.players.iter_mut() {
        p.is_active = false;
    }

    let next = next_index(&next_state.players, current);
    if next <= current {
        next_state.round += 1;
    }

    let outcome = evaluate(&next_state.players);
    next_state.current_player_index = next;
    if !outcome.game_over {
        next_state.players[next].is_active = true;
    } else {
        match &outcome.winner {
            Some(winner) => tracing::info!("Game over, {} wins", winner.name),
            None => tracing::info!("Game over, every player eliminated"),
        }
    }
    next_state.game_over = outcome.game_over;
    next_state.winner = outcome.winner;

    Ok(next_state)
}

/// Win detector
///
/// The game ends when:
/// 1. A player sits at exactly 50 points
/// 2. Only one player of two or more is left standing
/// 3. Every player is eliminated (no winner)
pub fn evaluate(players: &[Player]) -> GameOutcome {
    let mut at_target = players.iter().filter(|p| p.score == WINNING_SCORE);
    if let Some(winner) = at_target.next() {
        debug_assert!(
            at_target.next().is_none(),
            "more than one player at {} points",
            WINNING_SCORE
        );
        return GameOutcome::won_by(winner);
    }

    let remaining: SmallVec<[&Player; 8]> = players.iter().filter(|p| !p.is_eliminated).collect();

    if players.len() >= 2 && remaining.len() == 1 {
        return GameOutcome::won_by(remaining[0]);
    }

    if !players.is_empty() && remaining.is_empty() {
        return GameOutcome::draw();
    }

    GameOutcome::in_progress()
}

/// Points for the pins knocked down by one throw
///
/// No pin is a miss, a single pin scores its number and several pins score
/// one point each.
pub fn score_knocked_pins(pins: &[u8]) -> Result<u8, GameError> {
    let mut seen: u16 = 0;
    for &pin in pins {
        if !is_valid_pin(pin) {
            return Err(GameError::InvalidPin(pin));
        }
        if seen & (1 << pin) != 0 {
            return Err(GameError::DuplicatePin(pin));
        }
        seen |= 1 << pin;
    }

    Ok(match pins {
        [] => 0,
        [single] => *single,
        several => several.len() as u8,
    })
}

/// Players ordered by score, highest first
pub fn player_ranking(players: &[Player]) -> Vec<Player> {
    let mut ranked = players.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn game(names: &[&str]) -> GameState {
        GameState::new(names).unwrap()
    }

    fn throws(state: GameState, points: &[u8]) -> GameState {
        points
            .iter()
            .fold(state, |s, &p| apply_throw(&s, p).unwrap())
    }

    fn active_count(state: &GameState) -> usize {
        state.players.iter().filter(|p| p.is_active).count()
    }

    #[test]
    fn test_next_player_skips_eliminated() {
        let mut state = game(&["A", "B", "C"]);
        state.players[0].is_eliminated = true;
        assert_eq!(next_player_index(&state), 1);

        state.current_player_index = 2;
        assert_eq!(next_player_index(&state), 1); // Wraps around, skipping A
    }

    #[test]
    fn test_next_player_all_eliminated_terminates() {
        let mut state = game(&["A", "B", "C"]);
        for p in state.players.iter_mut() {
            p.is_eliminated = true;
        }
        state.current_player_index = 1;
        assert_eq!(next_player_index(&state), 2);
    }

    #[test]
    fn test_next_player_with_corrupt_pointer() {
        let mut state = game(&["A", "B", "C"]);
        state.current_player_index = usize::MAX;
        let next = next_player_index(&state);
        assert!(next < 3);
        assert_eq!(next, (usize::MAX % 3 + 1) % 3);
    }

    #[test]
    fn test_single_player_rotation_is_noop() {
        let state = game(&["Solo"]);
        assert_eq!(next_player_index(&state), 0);

        let state = apply_throw(&state, 5).unwrap();
        assert_eq!(state.current_player_index, 0);
        assert!(state.players[0].is_active);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_hit_adds_points_and_passes_turn() {
        let state = apply_throw(&game(&["Alice", "Bob"]), 6).unwrap();
        assert_eq!(state.players[0].score, 6);
        assert_eq!(state.current_player_index, 1);
        assert!(!state.players[0].is_active);
        assert!(state.players[1].is_active);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_input_state_is_not_modified() {
        let before = game(&["Alice", "Bob"]);
        let snapshot = before.clone();
        let after = apply_throw(&before, 9).unwrap();
        assert_eq!(before, snapshot);
        assert_ne!(after, before);
    }

    #[test]
    fn test_overshoot_resets_to_25() {
        let mut state = game(&["Alice", "Bob"]);
        state.players[0].score = 45;
        let state = apply_throw(&state, 6).unwrap();
        assert_eq!(state.players[0].score, BUST_RESET_SCORE);
        assert!(!state.game_over);

        let mut state = game(&["Alice", "Bob"]);
        state.players[0].score = 49;
        let state = apply_throw(&state, 12).unwrap();
        assert_eq!(state.players[0].score, 25);
    }

    #[test]
    fn test_exact_fifty_wins() {
        let mut state = game(&["Alice", "Bob", "Carol"]);
        state.players[0].score = 43;
        let state = apply_throw(&state, 7).unwrap();

        assert!(state.game_over);
        assert_eq!(state.winner.as_ref().map(|w| w.name.as_str()), Some("Alice"));
        assert_eq!(active_count(&state), 0);
    }

    #[test]
    fn test_three_misses_eliminate() {
        let state = game(&["Alice", "Bob", "Carol"]);
        // Alice misses on each of her turns, the others score
        let state = throws(state, &[0, 3, 3, 0, 3, 3]);
        assert_eq!(state.players[0].consecutive_misses, 2);
        assert!(!state.players[0].is_eliminated);

        let state = apply_throw(&state, 0).unwrap();
        assert!(state.players[0].is_eliminated);
        assert_eq!(state.players[0].score, 0);
        assert!(!state.game_over);
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_hit_resets_miss_counter() {
        let state = game(&["Alice", "Bob"]);
        let state = throws(state, &[0, 1, 0, 1, 4, 1]);
        assert_eq!(state.players[0].consecutive_misses, 0);
        assert_eq!(state.players[0].score, 4);

        let state = throws(state, &[0, 1, 0, 1]);
        assert_eq!(state.players[0].consecutive_misses, 2);
        assert!(!state.players[0].is_eliminated);
    }

    #[test]
    fn test_rotation_skips_eliminated_player() {
        let state = game(&["Alice", "Bob", "Carol"]);
        // Bob misses three times
        let state = throws(state, &[1, 0, 1, 1, 0, 1, 1, 0]);
        assert!(state.players[1].is_eliminated);
        assert_eq!(state.current_player_index, 2);

        let state = apply_throw(&state, 2).unwrap();
        assert_eq!(state.current_player_index, 0);
        let state = apply_throw(&state, 2).unwrap();
        assert_eq!(state.current_player_index, 2);
        assert!(state.players[2].is_active);
        assert!(!state.players[1].is_active);
    }

    #[test]
    fn test_round_counts_full_passes() {
        let state = game(&["Alice", "Bob", "Carol"]);
        let state = throws(state, &[1, 1]);
        assert_eq!(state.round, 1);
        let state = apply_throw(&state, 1).unwrap();
        assert_eq!(state.round, 2);

        // Carol is eliminated; a pass over Alice and Bob is still one round
        let mut state = state;
        state.players[2].is_eliminated = true;
        let state = throws(state, &[1, 1]);
        assert_eq!(state.round, 3);
        let state = throws(state, &[1, 1]);
        assert_eq!(state.round, 4);
    }

    #[test]
    fn test_elimination_leaves_last_player_winner() {
        let state = game(&["Alice", "Bob"]);
        let state = throws(state, &[6, 0, 12, 0, 12]);
        assert!(!state.game_over);

        let state = apply_throw(&state, 0).unwrap();
        assert!(state.players[1].is_eliminated);
        assert!(state.game_over);
        assert_eq!(state.winner.as_ref().map(|w| w.name.as_str()), Some("Alice"));
        assert_eq!(state.players[0].score, 30);
        assert_eq!(active_count(&state), 0);
    }

    #[test]
    fn test_eliminated_player_skipped_until_exact_win() {
        let state = game(&["Alice", "Bob", "Carol"]);
        // Alice 6, Bob misses three times while Carol and Alice keep scoring
        let state = throws(state, &[6, 0, 1, 12, 0, 1, 12, 0]);
        assert!(state.players[1].is_eliminated);
        assert_eq!(state.players[0].score, 30);

        let state = throws(state, &[1, 12, 1]);
        assert_eq!(state.players[0].score, 42);
        assert_eq!(state.current_player_index, 0);

        let state = apply_throw(&state, 8).unwrap();
        assert_eq!(state.players[0].score, 50);
        assert!(state.game_over);
        assert_eq!(state.winner.as_ref().map(|w| w.id.as_str()), Some("player-0"));
    }

    #[test]
    fn test_single_player_elimination_is_draw() {
        let state = throws(game(&["Solo"]), &[0, 0, 0]);
        assert!(state.game_over);
        assert!(state.winner.is_none());
        assert_eq!(active_count(&state), 0);
    }

    #[test]
    fn test_rejects_out_of_range_points() {
        let state = game(&["Alice", "Bob"]);
        assert_eq!(apply_throw(&state, 13).unwrap_err(), GameError::InvalidThrow(13));
        assert_eq!(apply_throw(&state, 44).unwrap_err(), GameError::InvalidThrow(44));
    }

    #[test]
    fn test_rejects_throw_after_game_over() {
        let mut state = game(&["Alice", "Bob"]);
        state.players[0].score = 38;
        let state = apply_throw(&state, 12).unwrap();
        assert!(state.game_over);
        assert_eq!(apply_throw(&state, 3).unwrap_err(), GameError::GameAlreadyOver);
    }

    #[test]
    fn test_history_records_each_throw() {
        let mut state = game(&["Alice", "Bob"]);
        state.players[1].score = 48;
        let state = throws(state, &[5, 7]);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].player_name, "Alice");
        assert_eq!(state.history[0].total_score, 5);
        assert_eq!(state.history[1].player_id, "player-1");
        assert_eq!(state.history[1].score, 7);
        assert_eq!(state.history[1].total_score, 25);
        assert_eq!(state.history[1].round, 1);
    }

    #[test]
    fn test_evaluate() {
        let mut players = game(&["A", "B", "C"]).players;
        assert_eq!(evaluate(&players), GameOutcome::in_progress());

        players[0].is_eliminated = true;
        players[1].is_eliminated = true;
        let outcome = evaluate(&players);
        assert!(outcome.game_over);
        assert_eq!(outcome.winner.map(|w| w.name), Some("C".to_string()));

        players[2].is_eliminated = true;
        assert_eq!(evaluate(&players), GameOutcome::draw());
    }

    #[test]
    fn test_random_games_keep_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let player_count = rng.gen_range(1..=5);
            let names: Vec<String> = (0..player_count).map(|i| format!("P{}", i)).collect();
            let mut state = GameState::new(names.as_slice()).unwrap();
            let mut passes_seen = 1;

            while !state.game_over {
                let points = if rng.gen_bool(0.25) { 0 } else { rng.gen_range(1..=12) };
                let before = state.current_player_index;
                state = apply_throw(&state, points).unwrap();

                for p in &state.players {
                    assert!(p.score <= WINNING_SCORE);
                    assert!(p.consecutive_misses <= 3);
                    assert_eq!(p.is_eliminated, p.consecutive_misses == 3);
                }
                if state.current_player_index <= before {
                    passes_seen += 1;
                }
                assert_eq!(state.round, passes_seen);

                let remaining = state.remaining_player_count();
                let someone_at_target = state.players.iter().any(|p| p.score == WINNING_SCORE);
                let expected_over = someone_at_target
                    || (player_count >= 2 && remaining <= 1)
                    || remaining == 0;
                assert_eq!(state.game_over, expected_over);

                if state.game_over {
                    assert_eq!(active_count(&state), 0);
                } else {
                    assert_eq!(active_count(&state), 1);
                    assert!(!state.players[state.current_player_index].is_eliminated);
                    assert!(state.players[state.current_player_index].is_active);
                }
            }
        }
    }

    #[test]
    fn test_score_knocked_pins() {
        assert_eq!(score_knocked_pins(&[]), Ok(0));
        assert_eq!(score_knocked_pins(&[9]), Ok(9));
        assert_eq!(score_knocked_pins(&[12, 3, 7]), Ok(3));
        assert_eq!(
            score_knocked_pins(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]),
            Ok(12)
        );
        assert_eq!(score_knocked_pins(&[0]), Err(GameError::InvalidPin(0)));
        assert_eq!(score_knocked_pins(&[4, 13]), Err(GameError::InvalidPin(13)));
        assert_eq!(score_knocked_pins(&[4, 4]), Err(GameError::DuplicatePin(4)));
    }

    #[test]
    fn test_player_ranking() {
        let mut players = game(&["A", "B", "C"]).players;
        players[0].score = 10;
        players[1].score = 30;
        players[2].score = 10;
        let names: Vec<_> = player_ranking(&players).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
