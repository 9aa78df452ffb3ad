pub mod pin_detector;

pub use pin_detector::{DetectionError, DetectorMode, MockPinDetector, PinDetector};
