//! Pose Geometry
//!
//! Keypoint data model and the geometry the push-up counter reads from it:
//! - COCO-17 landmark scheme with schema validation
//! - Joint angles from three landmarks
//! - Confidence-gated elbow angle and wrist-depth predicates

mod angle;
mod error;
mod evaluator;
mod keypoint;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use angle::joint_angle;
pub use error::GeometryError;
pub use evaluator::{AngleReading, Evaluator, Side, DEFAULT_MIN_CONFIDENCE};
pub use keypoint::{FrameSample, Keypoint, Landmark, REQUIRED_LANDMARKS};
