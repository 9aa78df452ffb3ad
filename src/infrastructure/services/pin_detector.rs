//! Pin detection
//!
//! Turns a photo of the playing field into pin states. Only a placeholder
//! detector exists: it checks the image is there and makes up a layout.

use std::path::Path;

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::PinState;
use crate::domain::value_objects::PIN_COUNT;

/// Pin detection error
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Image not found: {0}")]
    ImageNotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pin detector trait
#[async_trait]
pub trait PinDetector: Send + Sync {
    /// Detect the pins visible in the image at `image`
    async fn detect(&self, image: &Path) -> Result<Vec<PinState>, DetectionError>;
}

/// How the placeholder detector fills in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorMode {
    #[default]
    Random,
    Fixed,
}

impl DetectorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorMode::Random => "random",
            DetectorMode::Fixed => "fixed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Some(DetectorMode::Random),
            "fixed" => Some(DetectorMode::Fixed),
            _ => None,
        }
    }
}

/// Pins left standing by the fixed layout
const FIXED_STANDING: [u8; 5] = [2, 4, 6, 8, 12];
const FIELD_MIN: f32 = 50.0;
const FIELD_MAX: f32 = 350.0;

/// Placeholder detector used until a real model is available
pub struct MockPinDetector {
    mode: DetectorMode,
    rng: Mutex<ChaCha8Rng>,
}

impl MockPinDetector {
    pub fn new(mode: DetectorMode, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            mode,
            rng: Mutex::new(rng),
        }
    }

    pub fn mode(&self) -> DetectorMode {
        self.mode
    }

    async fn random_layout(&self) -> Vec<PinState> {
        let mut rng = self.rng.lock().await;
        (1..=PIN_COUNT as u8)
            .map(|number| {
                let is_standing = rng.gen_bool(0.5);
                let x = rng.gen_range(FIELD_MIN..FIELD_MAX);
                let y = rng.gen_range(FIELD_MIN..FIELD_MAX);
                let mut pin = PinState::standing(number, x, y);
                pin.is_standing = is_standing;
                pin
            })
            .collect()
    }

    fn fixed_layout() -> Vec<PinState> {
        // Traditional starting diamond, four rows deep
        const ROWS: [&[u8]; 4] = [&[7, 9, 8], &[5, 11, 12, 6], &[3, 10, 4], &[1, 2]];

        let mut pins: Vec<PinState> = ROWS
            .iter()
            .enumerate()
            .flat_map(|(row, numbers)| {
                let width = numbers.len() as f32;
                numbers.iter().enumerate().map(move |(col, &number)| {
                    let x = 200.0 + (col as f32 - (width - 1.0) / 2.0) * 40.0;
                    let y = FIELD_MIN + 60.0 + row as f32 * 40.0;
                    let mut pin = PinState::standing(number, x, y);
                    pin.is_standing = FIXED_STANDING.contains(&number);
                    pin
                })
            })
            .collect();
        pins.sort_by_key(|p| p.number);
        pins
    }
}

#[async_trait]
impl PinDetector for MockPinDetector {
    async fn detect(&self, image: &Path) -> Result<Vec<PinState>, DetectionError> {
        let metadata = match tokio::fs::metadata(image).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DetectionError::ImageNotFound(image.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(DetectionError::ImageNotFound(image.display().to_string()));
        }

        info!("Analyzing image: {}", image.display());

        let pins = match self.mode {
            DetectorMode::Random => self.random_layout().await,
            DetectorMode::Fixed => Self::fixed_layout(),
        };

        debug!(
            "Detected {} standing pins ({} mode)",
            pins.iter().filter(|p| p.is_standing).count(),
            self.mode.as_str()
        );
        Ok(pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::standing_numbers;
    use std::path::PathBuf;

    fn existing_file() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
    }

    #[tokio::test]
    async fn test_missing_image() {
        let detector = MockPinDetector::new(DetectorMode::Random, Some(1));
        let result = detector.detect(Path::new("/no/such/photo.jpg")).await;
        assert!(matches!(result, Err(DetectionError::ImageNotFound(_))));
    }

    #[tokio::test]
    async fn test_directory_is_not_an_image() {
        let detector = MockPinDetector::new(DetectorMode::Fixed, None);
        let result = detector.detect(Path::new(env!("CARGO_MANIFEST_DIR"))).await;
        assert!(matches!(result, Err(DetectionError::ImageNotFound(_))));
    }

    #[tokio::test]
    async fn test_fixed_layout() {
        let detector = MockPinDetector::new(DetectorMode::Fixed, None);
        let pins = detector.detect(&existing_file()).await.unwrap();

        assert_eq!(pins.len(), 12);
        assert_eq!(standing_numbers(&pins).as_slice(), &[2, 4, 6, 8, 12]);
        for (i, pin) in pins.iter().enumerate() {
            assert_eq!(pin.number as usize, i + 1);
        }
    }

    #[tokio::test]
    async fn test_random_layout_is_seedable() {
        let first = MockPinDetector::new(DetectorMode::Random, Some(42));
        let second = MockPinDetector::new(DetectorMode::Random, Some(42));

        let a = first.detect(&existing_file()).await.unwrap();
        let b = second.detect(&existing_file()).await.unwrap();
        assert_eq!(a, b);

        assert_eq!(a.len(), 12);
        for pin in &a {
            assert!(pin.has_valid_number());
            assert!(pin.position.x >= 50.0 && pin.position.x < 350.0);
            assert!(pin.position.y >= 50.0 && pin.position.y < 350.0);
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(DetectorMode::from_str("fixed"), Some(DetectorMode::Fixed));
        assert_eq!(DetectorMode::from_str(" Random "), Some(DetectorMode::Random));
        assert_eq!(DetectorMode::from_str("camera"), None);
    }
}
