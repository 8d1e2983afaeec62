//! Per-frame reports and emitted events

use serde::{Deserialize, Serialize};

use crate::motion::MotionReading;
use crate::state::PositionState;

/// Discrete changes for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CounterEvent {
    /// Position qualifier changed state
    PositionChanged {
        from: PositionState,
        to: PositionState,
    },

    /// A repetition was confirmed; `count` is the new total
    RepCounted { count: u32 },
}

/// Complete output of one processed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Position state after this frame
    pub position: PositionState,

    /// Motion label for this frame
    pub motion: MotionReading,

    /// Repetition count after this frame
    pub reps: u32,

    /// Events raised by this frame, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CounterEvent>,
}

impl FrameReport {
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// New position if the qualifier transitioned this frame
    pub fn position_change(&self) -> Option<PositionState> {
        self.events.iter().find_map(|e| match e {
            CounterEvent::PositionChanged { to, .. } => Some(*to),
            _ => None,
        })
    }

    /// New total if a rep was confirmed this frame
    pub fn rep_counted(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            CounterEvent::RepCounted { count } => Some(*count),
            _ => None,
        })
    }
}
