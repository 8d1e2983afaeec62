//! Synthetic push-up poses for tests and benchmarks

use crate::evaluator::Side;
use crate::keypoint::{FrameSample, Keypoint};

/// Both arms with the given elbow angle and wrists `depth_px` below the shoulders
///
/// Shoulder and wrist sit on a vertical line; the elbow is pushed sideways
/// until the interior angle matches. Shoulders are at y = 200, so the wrist
/// depth is exact for integral `depth_px`. Every other landmark has score 0.9.
pub fn pose(elbow_deg: f32, depth_px: f32, score: f32) -> FrameSample {
    let mut keypoints = vec![Keypoint::new(0.0, 0.0, 0.9); 17];
    let offset = (depth_px / 2.0) / (elbow_deg.to_radians() / 2.0).tan();

    for (side, x) in [(Side::Left, 220.0f32), (Side::Right, 420.0f32)] {
        keypoints[side.shoulder().index()] = Keypoint::new(x, 200.0, score);
        keypoints[side.elbow().index()] = Keypoint::new(x + offset, 200.0 + depth_px / 2.0, score);
        keypoints[side.wrist().index()] = Keypoint::new(x, 200.0 + depth_px, score);
    }
    FrameSample::new(keypoints)
}
