//! Per-frame motion label

use pose_geometry::AngleReading;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CounterConfig;

/// Status color tag for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Red,
    /// No usable measurement this frame
    Gray,
}

/// Diagnostic arm-motion label; does not gate counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionLabel {
    Lower,
    Hold,
    Up,
}

impl MotionLabel {
    pub fn label(self) -> &'static str {
        match self {
            MotionLabel::Lower => "Lower",
            MotionLabel::Hold => "Hold",
            MotionLabel::Up => "Up",
        }
    }
}

impl fmt::Display for MotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Motion label for one frame with the angle it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionReading {
    pub label: MotionLabel,
    pub color: StatusColor,
    /// Average elbow angle, absent on low confidence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<f32>,
}

impl MotionReading {
    pub fn from_angle(reading: AngleReading, config: &CounterConfig) -> Self {
        let Some(angle) = reading.degrees() else {
            return Self {
                label: MotionLabel::Hold,
                color: StatusColor::Gray,
                angle_deg: None,
            };
        };

        let (label, color) = if angle < config.angle_down_deg {
            (MotionLabel::Lower, StatusColor::Red)
        } else if angle > config.angle_up_deg {
            (MotionLabel::Up, StatusColor::Green)
        } else {
            (MotionLabel::Hold, StatusColor::Red)
        };

        Self {
            label,
            color,
            angle_deg: Some(angle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_for(deg: f32) -> MotionReading {
        MotionReading::from_angle(AngleReading::Measured(deg), &CounterConfig::default())
    }

    #[test]
    fn test_motion_labels() {
        assert_eq!(label_for(80.0).label, MotionLabel::Lower);
        assert_eq!(label_for(120.0).label, MotionLabel::Hold);
        assert_eq!(label_for(160.0).label, MotionLabel::Up);
        assert_eq!(label_for(160.0).color, StatusColor::Green);
    }

    #[test]
    fn test_threshold_edges_hold() {
        // Both thresholds are strict
        assert_eq!(label_for(100.0).label, MotionLabel::Hold);
        assert_eq!(label_for(140.0).label, MotionLabel::Hold);
    }

    #[test]
    fn test_low_confidence_is_gray_hold() {
        let reading = MotionReading::from_angle(
            AngleReading::InsufficientConfidence,
            &CounterConfig::default(),
        );
        assert_eq!(reading.label, MotionLabel::Hold);
        assert_eq!(reading.color, StatusColor::Gray);
        assert_eq!(reading.angle_deg, None);

        // Distinct from a measured hold
        assert_ne!(reading.color, label_for(120.0).color);
    }
}
