//! Confidence-gated geometry predicates
//!
//! Every reading refuses to use a landmark whose score is below the
//! configured floor. Callers get `InsufficientConfidence` (or `false` for
//! predicates) and must treat it as unfavourable.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::angle::joint_angle;
use crate::keypoint::{FrameSample, Keypoint, Landmark};

/// Default confidence floor for any landmark used in a reading
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Body side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn shoulder(self) -> Landmark {
        match self {
            Side::Left => Landmark::LeftShoulder,
            Side::Right => Landmark::RightShoulder,
        }
    }

    pub fn elbow(self) -> Landmark {
        match self {
            Side::Left => Landmark::LeftElbow,
            Side::Right => Landmark::RightElbow,
        }
    }

    pub fn wrist(self) -> Landmark {
        match self {
            Side::Left => Landmark::LeftWrist,
            Side::Right => Landmark::RightWrist,
        }
    }
}

/// Result of an angle measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AngleReading {
    /// Angle in degrees
    Measured(f32),
    /// A participating landmark was missing or below the confidence floor
    InsufficientConfidence,
}

impl AngleReading {
    pub fn degrees(self) -> Option<f32> {
        match self {
            AngleReading::Measured(deg) => Some(deg),
            AngleReading::InsufficientConfidence => None,
        }
    }

    /// Strictly below `threshold`; never true without a measurement
    pub fn is_below(self, threshold: f32) -> bool {
        matches!(self, AngleReading::Measured(deg) if deg < threshold)
    }

    /// Strictly above `threshold`; never true without a measurement
    pub fn is_above(self, threshold: f32) -> bool {
        matches!(self, AngleReading::Measured(deg) if deg > threshold)
    }
}

/// Computes joint angles and posture predicates from a frame sample
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    min_confidence: f32,
}

impl Evaluator {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Landmark if present and confident
    pub fn landmark<'a>(&self, sample: &'a FrameSample, landmark: Landmark) -> Option<&'a Keypoint> {
        let kp = sample.get(landmark)?;
        if kp.is_confident(self.min_confidence) {
            Some(kp)
        } else {
            trace!(
                "{} below confidence floor ({:.2} < {:.2})",
                landmark.name(),
                kp.score,
                self.min_confidence
            );
            None
        }
    }

    /// Angle at `vertex` between `a` and `c`
    pub fn angle(
        &self,
        sample: &FrameSample,
        a: Landmark,
        vertex: Landmark,
        c: Landmark,
    ) -> AngleReading {
        match (
            self.landmark(sample, a),
            self.landmark(sample, vertex),
            self.landmark(sample, c),
        ) {
            (Some(a), Some(b), Some(c)) => AngleReading::Measured(joint_angle(a, b, c)),
            _ => AngleReading::InsufficientConfidence,
        }
    }

    /// Shoulder-elbow-wrist angle for one arm
    pub fn elbow_angle(&self, sample: &FrameSample, side: Side) -> AngleReading {
        self.angle(sample, side.shoulder(), side.elbow(), side.wrist())
    }

    /// Mean of both elbow angles; needs all six arm landmarks
    pub fn average_elbow_angle(&self, sample: &FrameSample) -> AngleReading {
        match (
            self.elbow_angle(sample, Side::Left),
            self.elbow_angle(sample, Side::Right),
        ) {
            (AngleReading::Measured(left), AngleReading::Measured(right)) => {
                AngleReading::Measured((left + right) / 2.0)
            }
            _ => AngleReading::InsufficientConfidence,
        }
    }

    /// Mean wrist height is at least `margin_px` below mean shoulder height
    ///
    /// Image y grows downward. Returns false if any of the four landmarks
    /// is missing or unconfident.
    pub fn wrists_below_shoulders(&self, sample: &FrameSample, margin_px: f32) -> bool {
        let (Some(ls), Some(rs), Some(lw), Some(rw)) = (
            self.landmark(sample, Landmark::LeftShoulder),
            self.landmark(sample, Landmark::RightShoulder),
            self.landmark(sample, Landmark::LeftWrist),
            self.landmark(sample, Landmark::RightWrist),
        ) else {
            return false;
        };

        let shoulder_y = (ls.y + rs.y) / 2.0;
        let wrist_y = (lw.y + rw.y) / 2.0;
        wrist_y >= shoulder_y + margin_px
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}
