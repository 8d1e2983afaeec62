//! Session state tracked across frames

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CounterConfig;
use crate::motion::StatusColor;

/// Whether the subject is in push-up-ready posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PositionState {
    #[default]
    NotSet,
    Set,
}

impl PositionState {
    /// Status text shown to the user
    pub fn label(self) -> &'static str {
        match self {
            PositionState::NotSet => "Not set",
            PositionState::Set => "Set",
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            PositionState::NotSet => StatusColor::Red,
            PositionState::Set => StatusColor::Green,
        }
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Confirmed arm phase used for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionPhase {
    #[default]
    Up,
    Down,
}

/// Consecutive-frame confirmation counter
///
/// Qualifying frames add one, any other frame resets to zero. The frame
/// that reaches the threshold fires and resets the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debounce {
    count: u32,
    threshold: u32,
}

impl Debounce {
    pub fn new(threshold: u32) -> Self {
        Self { count: 0, threshold }
    }

    /// Feed one frame; true on the frame that confirms the transition
    pub fn observe(&mut self, qualifying: bool) -> bool {
        if !qualifying {
            self.count = 0;
            return false;
        }

        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Qualifying frames seen so far in the current run
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

/// Everything that persists between frames in one workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub position: PositionState,
    pub phase: MotionPhase,
    pub reps: u32,

    /// Frames confirming the start posture (NotSet → Set)
    pub init_confirm: Debounce,
    /// Frames confirming the subject left the posture (Set → NotSet)
    pub loss_confirm: Debounce,
    /// Frames confirming arms lowered (Up → Down)
    pub down_confirm: Debounce,
    /// Frames confirming arms extended (Down → Up)
    pub up_confirm: Debounce,
}

impl SessionState {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            position: PositionState::NotSet,
            phase: MotionPhase::Up,
            reps: 0,
            init_confirm: Debounce::new(config.init_frames),
            loss_confirm: Debounce::new(config.loss_frames),
            down_confirm: Debounce::new(config.confirm_frames),
            up_confirm: Debounce::new(config.confirm_frames),
        }
    }

    pub fn is_set(&self) -> bool {
        self.position == PositionState::Set
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&CounterConfig::default())
    }
}
