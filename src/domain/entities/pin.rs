use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::domain::value_objects::PIN_COUNT;

/// Location of a pin in the analysed photo (display only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PinPosition {
    pub x: f32,
    pub y: f32,
}

/// State of one pin as reported by a pin detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinState {
    /// Pin number (1-12)
    pub number: u8,
    pub is_standing: bool,
    pub position: PinPosition,
}

impl PinState {
    pub fn standing(number: u8, x: f32, y: f32) -> Self {
        Self {
            number,
            is_standing: true,
            position: PinPosition { x, y },
        }
    }

    pub fn fallen(number: u8) -> Self {
        Self {
            number,
            is_standing: false,
            position: PinPosition::default(),
        }
    }

    /// Whether the pin number is one of the twelve game pins
    #[inline]
    pub fn has_valid_number(&self) -> bool {
        is_valid_pin(self.number)
    }
}

#[inline]
pub fn is_valid_pin(number: u8) -> bool {
    (1..=PIN_COUNT as u8).contains(&number)
}

/// Sorted, de-duplicated numbers of the standing pins
///
/// Pins with a number outside 1-12 are skipped.
pub fn standing_numbers(pins: &[PinState]) -> SmallVec<[u8; PIN_COUNT]> {
    let mut numbers: SmallVec<[u8; PIN_COUNT]> = pins
        .iter()
        .filter(|pin| pin.is_standing)
        .filter(|pin| {
            let valid = pin.has_valid_number();
            if !valid {
                tracing::warn!("Ignoring pin with invalid number {}", pin.number);
            }
            valid
        })
        .map(|pin| pin.number)
        .collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}
