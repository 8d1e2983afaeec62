//! Push-up Repetition Counter
//!
//! Turns a per-frame keypoint stream into a debounced push-up count:
//! - Position qualifier (is the subject in plank posture?)
//! - Repetition counter (confirmed down → up elbow cycles)
//! - Motion label for live feedback

pub mod config;
pub mod motion;
pub mod qualifier;
pub mod repetition;
pub mod report;
pub mod state;

pub use config::CounterConfig;
pub use motion::{MotionLabel, MotionReading, StatusColor};
pub use report::{CounterEvent, FrameReport};
pub use state::{Debounce, MotionPhase, PositionState, SessionState};

use pose_geometry::FrameSample;
use thiserror::Error;
use tracing::{debug, info};

use qualifier::qualify_position;
use repetition::count_repetition;

/// Counter error types
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Advance the session by one frame
///
/// Runs the position qualifier, labels the motion, and counts reps if the
/// subject is set after the qualifier step.
pub fn step(
    mut state: SessionState,
    sample: &FrameSample,
    config: &CounterConfig,
) -> (SessionState, FrameReport) {
    let evaluator = config.evaluator();
    let mut events = Vec::new();

    let before = state.position;
    if let Some(to) = qualify_position(&mut state, sample, &evaluator, config) {
        events.push(CounterEvent::PositionChanged { from: before, to });
    }

    let angle = evaluator.average_elbow_angle(sample);
    let motion = MotionReading::from_angle(angle, config);

    if state.is_set() {
        if let Some(count) = count_repetition(&mut state, angle, config) {
            events.push(CounterEvent::RepCounted { count });
        }
    }

    let report = FrameReport {
        position: state.position,
        motion,
        reps: state.reps,
        events,
    };
    (state, report)
}

/// Stateful push-up counter for one workout session
pub struct RepCounter {
    config: CounterConfig,
    state: SessionState,
}

impl RepCounter {
    /// Create a counter with validated configuration
    pub fn new(config: CounterConfig) -> Result<Self, CounterError> {
        config.validate()?;
        info!("Creating rep counter with config: {:?}", config);
        Ok(Self {
            state: SessionState::new(&config),
            config,
        })
    }

    /// Process one frame sample
    pub fn process(&mut self, sample: &FrameSample) -> FrameReport {
        let (state, report) = step(self.state.clone(), sample, &self.config);
        self.state = state;

        debug!(
            "Frame: position={} motion={} angle={:?} reps={}",
            report.position, report.motion.label, report.motion.angle_deg, report.reps
        );
        report
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn reps(&self) -> u32 {
        self.state.reps
    }

    pub fn position(&self) -> PositionState {
        self.state.position
    }

    /// Start a fresh session (restart)
    pub fn reset_state(&mut self) {
        info!("Resetting session after {} reps", self.state.reps);
        self.state = SessionState::new(&self.config);
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self {
            config: CounterConfig::default(),
            state: SessionState::default(),
        }
    }
}
