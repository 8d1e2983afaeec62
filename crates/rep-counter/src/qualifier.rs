//! Position qualifier
//!
//! Entering "set" needs wrists well below the shoulders with extended arms
//! for `init_frames` frames. Leaving needs the wrists to rise above the
//! smaller loss margin for `loss_frames` frames, so a few bad frames do not
//! drop the session out of counting.

use pose_geometry::{Evaluator, FrameSample};
use tracing::{debug, info};

use crate::config::CounterConfig;
use crate::state::{PositionState, SessionState};

/// Run one qualifier step; returns the new state on a transition
pub fn qualify_position(
    state: &mut SessionState,
    sample: &FrameSample,
    evaluator: &Evaluator,
    config: &CounterConfig,
) -> Option<PositionState> {
    match state.position {
        PositionState::NotSet => {
            let qualifying = evaluator.wrists_below_shoulders(sample, config.init_margin_px)
                && evaluator
                    .average_elbow_angle(sample)
                    .is_above(config.angle_up_deg);

            if state.init_confirm.observe(qualifying) {
                state.position = PositionState::Set;
                info!("Position set after {} frames", config.init_frames);
                Some(PositionState::Set)
            } else {
                debug!("Init confirmation {}/{}", state.init_confirm.count(), config.init_frames);
                None
            }
        }
        PositionState::Set => {
            let holding = evaluator.wrists_below_shoulders(sample, config.loss_margin_px);

            if state.loss_confirm.observe(!holding) {
                state.position = PositionState::NotSet;
                // Re-entry needs a fresh run of qualifying frames
                state.init_confirm.reset();
                info!("Position lost after {} frames", config.loss_frames);
                Some(PositionState::NotSet)
            } else {
                if state.loss_confirm.count() > 0 {
                    debug!("Loss confirmation {}/{}", state.loss_confirm.count(), config.loss_frames);
                }
                None
            }
        }
    }
}
