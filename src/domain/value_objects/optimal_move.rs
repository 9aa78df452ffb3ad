use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::domain::entities::PinState;
use crate::domain::value_objects::PIN_COUNT;

/// Pin numbers to aim for
pub type TargetPins = SmallVec<[u8; PIN_COUNT]>;

/// Which case of the advisor produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveKind {
    /// A standing pin scores exactly the points needed
    DirectWin,
    /// Single pin that gets closer to 50 without busting
    Approach,
    /// Several pins, scored by how many fall
    Cluster,
    /// Highest standing pin, when no cluster helps
    HighestPin,
    /// Every standing pin would bust the player
    NoSafeTarget,
    /// No pins standing
    NoStandingPins,
    /// Player already sits at (or above) 50
    TargetReached,
}

impl MoveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::DirectWin => "directWin",
            MoveKind::Approach => "approach",
            MoveKind::Cluster => "cluster",
            MoveKind::HighestPin => "highestPin",
            MoveKind::NoSafeTarget => "noSafeTarget",
            MoveKind::NoStandingPins => "noStandingPins",
            MoveKind::TargetReached => "targetReached",
        }
    }
}

/// Move advisor output
///
/// `win_probability` is a coarse heuristic for display, not a calibrated
/// probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalMove {
    pub kind: MoveKind,
    pub target_pins: TargetPins,
    pub available_pins: Vec<PinState>,
    /// Points the throw scores if exactly the target pins fall
    pub expected_score: u8,
    pub win_probability: f32,
    pub current_score: u8,
    pub recommendation: String,
    pub strategy_explanation: String,
}

impl OptimalMove {
    /// Whether the move names at least one pin
    pub fn has_target(&self) -> bool {
        !self.target_pins.is_empty()
    }
}

/// Suggestion priority, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::VeryHigh => "Very High",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// How hard the targeted pins are to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// What a suggestion leads to if it succeeds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_to_target: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_probability: Option<f32>,
}

/// One entry of the ranked strategy list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySuggestion {
    pub pins: TargetPins,
    pub reason: String,
    pub difficulty: Difficulty,
    pub priority: Priority,
    pub expected_outcome: ExpectedOutcome,
}
