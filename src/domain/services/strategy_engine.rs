//! Strategy engine
//!
//! Builds a ranked list of throw suggestions for the active player: direct
//! wins, ways to approach 50, safety plays near the target and defensive
//! plays when an opponent is about to finish.

use crate::domain::entities::is_valid_pin;
use crate::domain::value_objects::{
    Difficulty, ExpectedOutcome, GameState, Priority, StrategySuggestion, TargetPins,
    MAX_THROW_POINTS, WINNING_SCORE,
};

/// Score from which safety plays are considered
const SAFETY_ZONE: u8 = WINNING_SCORE - 15;
/// Points from 50 at which a player counts as close to winning
const THREAT_DISTANCE: u8 = 10;
/// Pins worth aiming at when far from the target
const HIGH_VALUE_PIN: u8 = 8;
/// Pin value a defensive throw aims near
const DEFENSIVE_TARGET: u8 = 6;
const MAX_CLUSTER_SIZE: usize = 3;

const DIRECT_WIN_PROBABILITY: f32 = 0.7;
const EXACT_GROUP_PROBABILITY: f32 = 0.5;

/// Ranked suggestions for the active player, most urgent first
pub fn suggest_strategies(state: &GameState, standing_pins: &[u8]) -> Vec<StrategySuggestion> {
    if state.game_over {
        return Vec::new();
    }
    let Some(player) = state.current_player() else {
        return Vec::new();
    };

    let mut standing: TargetPins = standing_pins
        .iter()
        .copied()
        .filter(|&n| is_valid_pin(n))
        .collect();
    standing.sort_unstable();
    standing.dedup();

    let score = player.score;
    let need = WINNING_SCORE.saturating_sub(score);
    let mut suggestions = Vec::new();

    if need > 0 && need <= MAX_THROW_POINTS && standing.contains(&need) {
        suggestions.push(StrategySuggestion {
            pins: TargetPins::from_slice(&[need]),
            reason: "Direct win".to_string(),
            difficulty: difficulty(&[need]),
            priority: Priority::VeryHigh,
            expected_outcome: ExpectedOutcome {
                new_score: Some(WINNING_SCORE),
                win_probability: Some(DIRECT_WIN_PROBABILITY),
                ..Default::default()
            },
        });
    }

    suggestions.extend(approach_strategies(score, &standing));

    if score >= SAFETY_ZONE {
        suggestions.extend(safety_plays(score, &standing));
    }

    let threatened = state.players.iter().enumerate().any(|(index, p)| {
        index != state.current_player_index
            && !p.is_eliminated
            && WINNING_SCORE.saturating_sub(p.score) <= THREAT_DISTANCE
    });
    if threatened && need > THREAT_DISTANCE {
        suggestions.extend(defensive_play(score, &standing));
    }

    suggestions.sort_by_key(|s| s.priority);
    suggestions
}

/// Rough difficulty of hitting exactly these pins
pub fn difficulty(pins: &[u8]) -> Difficulty {
    match pins {
        [single] if *single <= 4 => Difficulty::Easy,
        [single] if *single <= 8 => Difficulty::Medium,
        [_] => Difficulty::Hard,
        [_, _] => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

fn approach_strategies(score: u8, standing: &[u8]) -> Vec<StrategySuggestion> {
    let mut strategies = Vec::new();
    let need = WINNING_SCORE.saturating_sub(score);

    if need > MAX_THROW_POINTS {
        let high_value: TargetPins = standing
            .iter()
            .copied()
            .filter(|&n| n >= HIGH_VALUE_PIN)
            .collect();
        if let Some(&best) = high_value.iter().max() {
            strategies.push(StrategySuggestion {
                difficulty: difficulty(&high_value),
                pins: high_value,
                reason: "Increase score quickly with high-value pins".to_string(),
                priority: Priority::High,
                expected_outcome: progress(score, best),
            });
        }

        if standing.len() >= 2 {
            let cluster: TargetPins = standing.iter().copied().take(MAX_CLUSTER_SIZE).collect();
            let count = cluster.len() as u8;
            strategies.push(StrategySuggestion {
                pins: cluster,
                reason: "Hit multiple pins for steady progress".to_string(),
                difficulty: Difficulty::Medium,
                priority: Priority::Medium,
                expected_outcome: progress(score, count),
            });
        }
    }

    if need > 5 && need <= MAX_THROW_POINTS {
        // The exact pin is the direct win, so stay strictly below it
        if let Some(pin) = closest_pin_not_over(standing, need, need - 1) {
            strategies.push(StrategySuggestion {
                pins: TargetPins::from_slice(&[pin]),
                reason: format!("Get close to target score with pin {}", pin),
                difficulty: difficulty(&[pin]),
                priority: Priority::High,
                expected_outcome: progress(score, pin),
            });
        }
    }

    strategies
}

fn safety_plays(score: u8, standing: &[u8]) -> Vec<StrategySuggestion> {
    let mut strategies = Vec::new();
    let need = WINNING_SCORE.saturating_sub(score);

    // An exact pin is already covered by the direct win
    if need == 0 || need > 5 || standing.contains(&need) {
        return strategies;
    }

    if need >= 2 && standing.len() >= need as usize {
        let group: TargetPins = standing.iter().copied().take(need as usize).collect();
        strategies.push(StrategySuggestion {
            difficulty: difficulty(&group),
            pins: group,
            reason: format!("Knock down {} pins together for exactly {} points", need, need),
            priority: Priority::High,
            expected_outcome: ExpectedOutcome {
                new_score: Some(WINNING_SCORE),
                win_probability: Some(EXACT_GROUP_PROBABILITY),
                ..Default::default()
            },
        });
    }

    if let Some(&safest) = standing.iter().filter(|&&n| n < need).max() {
        strategies.push(StrategySuggestion {
            pins: TargetPins::from_slice(&[safest]),
            reason: "Safe play to avoid going over".to_string(),
            difficulty: difficulty(&[safest]),
            priority: Priority::Medium,
            expected_outcome: progress(score, safest),
        });
    }

    strategies
}

fn defensive_play(score: u8, standing: &[u8]) -> Option<StrategySuggestion> {
    let need = WINNING_SCORE.saturating_sub(score);
    let pin = closest_pin_not_over(standing, DEFENSIVE_TARGET, need)?;
    Some(StrategySuggestion {
        pins: TargetPins::from_slice(&[pin]),
        reason: "Defensive play to keep pace with other players".to_string(),
        difficulty: difficulty(&[pin]),
        priority: Priority::Medium,
        expected_outcome: progress(score, pin),
    })
}

/// Pin nearest to `target` that does not exceed `limit`, higher pin on ties
fn closest_pin_not_over(standing: &[u8], target: u8, limit: u8) -> Option<u8> {
    standing
        .iter()
        .copied()
        .filter(|&n| n <= limit)
        .min_by_key(|&n| (n.abs_diff(target), std::cmp::Reverse(n)))
}

fn progress(score: u8, points: u8) -> ExpectedOutcome {
    let new_score = score.saturating_add(points).min(WINNING_SCORE);
    ExpectedOutcome {
        new_score: Some(new_score),
        remaining_to_target: Some(WINNING_SCORE - new_score),
        win_probability: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_scores(scores: &[u8]) -> GameState {
        let names: Vec<String> = (0..scores.len()).map(|i| format!("P{}", i)).collect();
        let mut state = GameState::new(names.as_slice()).unwrap();
        for (player, &score) in state.players.iter_mut().zip(scores) {
            player.score = score;
        }
        state
    }

    #[test]
    fn test_direct_win_ranks_first() {
        let state = state_with_scores(&[43, 0]);
        let suggestions = suggest_strategies(&state, &[10, 7, 9]);

        let first = &suggestions[0];
        assert_eq!(first.pins.as_slice(), &[7]);
        assert_eq!(first.priority, Priority::VeryHigh);
        assert_eq!(first.expected_outcome.new_score, Some(50));
        assert_eq!(first.expected_outcome.win_probability, Some(0.7));
    }

    #[test]
    fn test_far_from_target() {
        let state = state_with_scores(&[10, 0]);
        let suggestions = suggest_strategies(&state, &[11, 1, 2, 3, 8]);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].pins.as_slice(), &[8, 11]);
        assert_eq!(suggestions[0].priority, Priority::High);
        assert_eq!(suggestions[0].expected_outcome.new_score, Some(21));
        assert_eq!(suggestions[0].expected_outcome.remaining_to_target, Some(29));

        assert_eq!(suggestions[1].pins.as_slice(), &[1, 2, 3]);
        assert_eq!(suggestions[1].priority, Priority::Medium);
        assert_eq!(suggestions[1].expected_outcome.new_score, Some(13));
    }

    #[test]
    fn test_mid_range_picks_pin_under_need() {
        let state = state_with_scores(&[41, 0]);
        let suggestions = suggest_strategies(&state, &[4, 8, 12]);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].pins.as_slice(), &[8]);
        assert_eq!(suggestions[0].expected_outcome.remaining_to_target, Some(1));
    }

    #[test]
    fn test_safety_group_of_pins() {
        let state = state_with_scores(&[47, 0]);
        let suggestions = suggest_strategies(&state, &[5, 8, 10]);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].pins.as_slice(), &[5, 8, 10]);
        assert_eq!(suggestions[0].priority, Priority::High);
        assert_eq!(suggestions[0].expected_outcome.win_probability, Some(0.5));
    }

    #[test]
    fn test_safety_play_below_need() {
        let state = state_with_scores(&[46, 0]);
        let suggestions = suggest_strategies(&state, &[2, 6, 9]);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].pins.as_slice(), &[2]);
        assert_eq!(suggestions[0].reason, "Safe play to avoid going over");
        assert_eq!(suggestions[0].expected_outcome.new_score, Some(48));
    }

    #[test]
    fn test_defensive_play_when_opponent_is_close() {
        let state = state_with_scores(&[20, 42]);
        let suggestions = suggest_strategies(&state, &[5, 6, 7]);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].reason, "Hit multiple pins for steady progress");
        assert_eq!(suggestions[1].pins.as_slice(), &[6]);
        assert_eq!(
            suggestions[1].reason,
            "Defensive play to keep pace with other players"
        );
    }

    #[test]
    fn test_no_defense_when_close_ourselves() {
        let state = state_with_scores(&[41, 42]);
        let suggestions = suggest_strategies(&state, &[5, 6, 7]);
        assert!(suggestions
            .iter()
            .all(|s| !s.reason.starts_with("Defensive")));
    }

    #[test]
    fn test_eliminated_opponent_is_no_threat() {
        let mut state = state_with_scores(&[20, 45, 10]);
        state.players[1].is_eliminated = true;
        let suggestions = suggest_strategies(&state, &[5, 6, 7]);
        assert!(suggestions
            .iter()
            .all(|s| !s.reason.starts_with("Defensive")));
    }

    #[test]
    fn test_finished_game_has_no_suggestions() {
        let mut state = state_with_scores(&[50, 10]);
        state.game_over = true;
        assert!(suggest_strategies(&state, &[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_difficulty() {
        assert_eq!(difficulty(&[3]), Difficulty::Easy);
        assert_eq!(difficulty(&[7]), Difficulty::Medium);
        assert_eq!(difficulty(&[12]), Difficulty::Hard);
        assert_eq!(difficulty(&[1, 2]), Difficulty::Medium);
        assert_eq!(difficulty(&[1, 2, 3]), Difficulty::Hard);
    }
}
