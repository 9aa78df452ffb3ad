//! Move advisor
//!
//! Picks the pin(s) the active player should aim for given the pins still
//! standing. Win probabilities are fixed heuristics per case, meant for
//! display only.

use crate::domain::entities::{standing_numbers, PinState};
use crate::domain::services::score_knocked_pins;
use crate::domain::value_objects::{MoveKind, OptimalMove, TargetPins, MAX_THROW_POINTS, WINNING_SCORE};

const DIRECT_WIN_PROBABILITY: f32 = 0.8;
const APPROACH_PROBABILITY: f32 = 0.6;
const EXACT_CLUSTER_PROBABILITY: f32 = 0.5;
const PARTIAL_CLUSTER_PROBABILITY: f32 = 0.3;
const HIGHEST_PIN_PROBABILITY: f32 = 0.3;
const MIN_CLUSTER_PROBABILITY: f32 = 0.1;

/// Numeric groups used as stand-ins for pins that stand close together
const PIN_GROUPS: [(u8, u8); 3] = [(1, 4), (5, 8), (9, 12)];

/// Recommend a move for a player on `active_player_score`
pub fn recommend(pins: &[PinState], active_player_score: u8) -> OptimalMove {
    let standing = standing_numbers(pins);
    let need = WINNING_SCORE as i16 - active_player_score as i16;

    let build = |kind: MoveKind,
                 target_pins: TargetPins,
                 win_probability: f32,
                 recommendation: String,
                 strategy_explanation: String| {
        // Target pins always come from the validated standing set
        let expected_score = score_knocked_pins(&target_pins).unwrap_or(0);
        OptimalMove {
            kind,
            target_pins,
            available_pins: pins.to_vec(),
            expected_score,
            win_probability: win_probability.clamp(0.0, 1.0),
            current_score: active_player_score,
            recommendation,
            strategy_explanation,
        }
    };

    if need <= 0 {
        let explanation = if need == 0 {
            format!("You already have {} points. The game is won.", WINNING_SCORE)
        } else {
            format!(
                "A score above {} is not reachable; it resets to 25.",
                WINNING_SCORE
            )
        };
        return build(
            MoveKind::TargetReached,
            TargetPins::new(),
            0.0,
            "No throw needed.".to_string(),
            explanation,
        );
    }
    let need = need as u8;

    if standing.is_empty() {
        return build(
            MoveKind::NoStandingPins,
            TargetPins::new(),
            0.0,
            "No pins are standing.".to_string(),
            format!("You need {} points to win but there is nothing to aim for.", need),
        );
    }

    if standing.contains(&need) {
        return build(
            MoveKind::DirectWin,
            TargetPins::from_slice(&[need]),
            DIRECT_WIN_PROBABILITY,
            format!("Aim for pin #{} to win the game!", need),
            format!(
                "You need exactly {} points to reach {} and win. Hit pin #{} on its own for the win.",
                need, WINNING_SCORE, need
            ),
        );
    }

    if need <= MAX_THROW_POINTS {
        return recommend_near_target(&standing, need, build);
    }

    // Out of reach of a single pin: knock a group over for steady progress
    let best_group = PIN_GROUPS
        .iter()
        .map(|&(low, high)| {
            standing
                .iter()
                .copied()
                .filter(|&n| n >= low && n <= high)
                .collect::<TargetPins>()
        })
        .max_by_key(|group| group.len())
        .unwrap_or_default();

    if best_group.len() >= 2 {
        let count = best_group.len() as u8;
        let probability = cluster_probability(need, count);
        return build(
            MoveKind::Cluster,
            best_group,
            probability,
            format!("Try to knock down {} pins at once.", count),
            format!(
                "You need {} points to win. Knocking down {} pins gives you {} points. You'll still need {} more points after this throw.",
                need,
                count,
                count,
                need - count
            ),
        );
    }

    let highest = standing.iter().copied().max().unwrap_or_default();
    build(
        MoveKind::HighestPin,
        TargetPins::from_slice(&[highest]),
        HIGHEST_PIN_PROBABILITY,
        format!("Aim for pin #{} for maximum points.", highest),
        format!(
            "You need {} points to win. No group of pins stands together, so aim for the highest value pin (#{}) to maximize your score.",
            need, highest
        ),
    )
}

/// Need is 1-12 and no standing pin matches it exactly
fn recommend_near_target<F>(standing: &[u8], need: u8, build: F) -> OptimalMove
where
    F: Fn(MoveKind, TargetPins, f32, String, String) -> OptimalMove,
{
    if let Some(&pin) = standing.iter().filter(|&&n| n < need).max() {
        return build(
            MoveKind::Approach,
            TargetPins::from_slice(&[pin]),
            APPROACH_PROBABILITY,
            format!("Aim for pin #{} to get closer to winning.", pin),
            format!(
                "You need {} points to win. Hitting pin #{} leaves {} to go without going over {}.",
                need,
                pin,
                need - pin,
                WINNING_SCORE
            ),
        );
    }

    // Every single pin busts, but several pins only score their count
    if need >= 2 && standing.len() >= 2 {
        let size = standing.len().min(need as usize);
        let cluster: TargetPins = standing.iter().copied().take(size).collect();
        let count = size as u8;
        let (probability, explanation) = if count == need {
            (
                EXACT_CLUSTER_PROBABILITY,
                format!(
                    "Every standing pin is worth more than the {} points you need. Knocking down {} pins together scores exactly {}.",
                    need, count, need
                ),
            )
        } else {
            (
                PARTIAL_CLUSTER_PROBABILITY,
                format!(
                    "Every standing pin is worth more than the {} points you need. Knocking down {} pins together scores {} safely.",
                    need, count, count
                ),
            )
        };
        return build(
            MoveKind::Cluster,
            cluster,
            probability,
            format!("Try to knock down {} pins at once.", count),
            explanation,
        );
    }

    build(
        MoveKind::NoSafeTarget,
        TargetPins::new(),
        0.0,
        "No safe target: any hit takes you over 50.".to_string(),
        format!(
            "You need {} points and every standing pin is worth more. A hit resets you to 25; a miss keeps your score but counts toward elimination.",
            need
        ),
    )
}

/// Heuristic: closer to 50 and fewer pins is better
fn cluster_probability(need: u8, count: u8) -> f32 {
    let distance = need.saturating_sub(count) as f32;
    (1.0 - distance / WINNING_SCORE as f32 - count as f32 * 0.05).max(MIN_CLUSTER_PROBABILITY)
}
