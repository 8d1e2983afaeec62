//! Repetition counter
//!
//! Only runs while the position is "set". A rep is one confirmed Up → Down
//! → Up cycle; the count moves on the Down → Up confirmation.

use pose_geometry::AngleReading;
use tracing::{debug, info};

use crate::config::CounterConfig;
use crate::state::{MotionPhase, SessionState};

/// Run one counting step; returns the new total when a rep is confirmed
///
/// A low-confidence reading is below neither threshold nor above either,
/// so it resets whichever counter is active.
pub fn count_repetition(
    state: &mut SessionState,
    angle: AngleReading,
    config: &CounterConfig,
) -> Option<u32> {
    match state.phase {
        MotionPhase::Up => {
            if state.down_confirm.observe(angle.is_below(config.angle_down_deg)) {
                state.phase = MotionPhase::Down;
                debug!("Arms lowered, phase Down");
            }
            None
        }
        MotionPhase::Down => {
            if state.up_confirm.observe(angle.is_above(config.angle_up_deg)) {
                state.reps += 1;
                state.phase = MotionPhase::Up;
                info!("Push-up counted: {}", state.reps);
                Some(state.reps)
            } else {
                None
            }
        }
    }
}
