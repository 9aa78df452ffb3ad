use std::path::Path;
use std::sync::Arc;

use crate::application::advisor::{advise_move, Advice, AdviseMoveError};
use crate::domain::value_objects::GameState;
use crate::infrastructure::services::{DetectionError, PinDetector};

/// Analyze photo use case
pub struct AnalyzePhoto {
    detector: Arc<dyn PinDetector>,
}

impl AnalyzePhoto {
    pub fn new(detector: Arc<dyn PinDetector>) -> Self {
        Self { detector }
    }

    /// Detect the pins in `image` and advise the active player
    pub async fn execute(&self, state: &GameState, image: &Path) -> Result<Advice, AnalyzePhotoError> {
        if state.game_over {
            return Err(AdviseMoveError::GameOver.into());
        }
        let pins = self.detector.detect(image).await?;
        Ok(advise_move(state, pins)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzePhotoError {
    #[error("Detection failed: {0}")]
    Detection(#[from] DetectionError),
    #[error(transparent)]
    Advice(#[from] AdviseMoveError),
}
