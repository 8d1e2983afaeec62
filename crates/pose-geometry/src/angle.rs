//! Joint angle calculation using the dot product
//!
//! The angle at vertex B is taken between vectors B→A and B→C.

use crate::keypoint::Keypoint;

/// Interior angle at `b` in degrees, in [0, 180]
///
/// Uses cos(θ) = (BA · BC) / (|BA| × |BC|). Returns 0 when either vector
/// has zero length, meaning "no angle information".
pub fn joint_angle(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> f32 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    let mag_ba = (ba.0 * ba.0 + ba.1 * ba.1).sqrt();
    let mag_bc = (bc.0 * bc.0 + bc.1 * bc.1).sqrt();

    let denom = mag_ba * mag_bc;
    if denom == 0.0 {
        return 0.0;
    }

    // Rounding can push the ratio just past ±1, and the result just past 180
    (dot / denom).clamp(-1.0, 1.0).acos().to_degrees().min(180.0)
}
