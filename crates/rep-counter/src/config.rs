//! Counter configuration

use pose_geometry::{Evaluator, DEFAULT_MIN_CONFIDENCE};
use serde::{Deserialize, Serialize};

use crate::CounterError;

/// Thresholds for the position qualifier and repetition counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Confidence floor for every landmark used in a reading
    pub min_confidence: f32,

    /// Wrist depth below shoulders needed to enter "set" (pixels)
    pub init_margin_px: f32,

    /// Wrist depth below shoulders needed to stay "set" (pixels)
    pub loss_margin_px: f32,

    /// Elbow angle below which the arms count as lowered (degrees)
    pub angle_down_deg: f32,

    /// Elbow angle above which the arms count as extended (degrees)
    pub angle_up_deg: f32,

    /// Consecutive qualifying frames to enter "set"
    pub init_frames: u32,

    /// Consecutive failing frames to leave "set"
    pub loss_frames: u32,

    /// Consecutive frames to confirm a down or up transition
    pub confirm_frames: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            init_margin_px: 50.0,
            loss_margin_px: 30.0,
            angle_down_deg: 100.0,
            angle_up_deg: 140.0,
            init_frames: 5,
            loss_frames: 10,
            confirm_frames: 5,
        }
    }
}

impl CounterConfig {
    /// Create strict config (deeper reps, longer confirmation)
    pub fn strict() -> Self {
        Self {
            angle_down_deg: 90.0,
            angle_up_deg: 150.0,
            confirm_frames: 7,
            ..Default::default()
        }
    }

    /// Create lenient config (shallower reps, faster confirmation)
    pub fn lenient() -> Self {
        Self {
            angle_down_deg: 110.0,
            angle_up_deg: 130.0,
            confirm_frames: 3,
            loss_frames: 15,
            ..Default::default()
        }
    }

    /// Reject threshold combinations the state machines cannot work with
    pub fn validate(&self) -> Result<(), CounterError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CounterError::Config(format!(
                "min_confidence {} outside [0, 1]",
                self.min_confidence
            )));
        }
        for (name, value) in [
            ("angle_down_deg", self.angle_down_deg),
            ("angle_up_deg", self.angle_up_deg),
            ("init_margin_px", self.init_margin_px),
            ("loss_margin_px", self.loss_margin_px),
        ] {
            if !value.is_finite() {
                return Err(CounterError::Config(format!("{} must be finite, got {}", name, value)));
            }
        }
        if self.init_frames == 0 || self.loss_frames == 0 || self.confirm_frames == 0 {
            return Err(CounterError::Config(
                "frame thresholds must be at least 1".to_string(),
            ));
        }
        if self.angle_down_deg >= self.angle_up_deg {
            return Err(CounterError::Config(format!(
                "angle_down_deg {} must be below angle_up_deg {}",
                self.angle_down_deg, self.angle_up_deg
            )));
        }
        if self.loss_margin_px < 0.0 || self.loss_margin_px > self.init_margin_px {
            return Err(CounterError::Config(format!(
                "loss_margin_px {} must be in [0, init_margin_px {}]",
                self.loss_margin_px, self.init_margin_px
            )));
        }
        Ok(())
    }

    /// Geometry evaluator using this config's confidence floor
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.min_confidence)
    }
}
