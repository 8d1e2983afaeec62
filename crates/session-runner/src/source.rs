//! Pose source abstraction
//!
//! A source runs one pose inference per call. The runner awaits it once
//! per cycle and never overlaps two calls.

use pose_geometry::{FrameSample, GeometryError};
use std::collections::VecDeque;
use std::future::Future;
use thiserror::Error;

/// Outcome of one inference call
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// Keypoints for the first detected person
    Subject(FrameSample),
    /// Inference ran but found nobody
    NoSubject,
}

/// Errors from a pose source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Inference failed for this cycle
    #[error("Pose inference failed: {0}")]
    Inference(String),

    /// The stream has no more estimates
    #[error("Pose stream ended")]
    Exhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A recorded estimate could not be decoded
    #[error("Malformed estimate on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid keypoints: {0}")]
    Geometry(#[from] GeometryError),
}

impl SourceError {
    /// Errors that make every later cycle meaningless
    ///
    /// A landmark ordering mismatch means every index we read is wrong.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SourceError::Geometry(GeometryError::SchemaMismatch { .. }))
    }
}

/// Upstream pose-estimation collaborator
pub trait PoseSource {
    /// Run one pose inference
    fn estimate(&mut self) -> impl Future<Output = Result<Detection, SourceError>> + Send;
}

/// In-memory source that plays back a fixed script, then reports `Exhausted`
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Result<Detection, SourceError>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `frames` copies of a sample
    pub fn push_subject(&mut self, sample: FrameSample, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.script.push_back(Ok(Detection::Subject(sample.clone())));
        }
        self
    }

    pub fn push_no_subject(&mut self) -> &mut Self {
        self.script.push_back(Ok(Detection::NoSubject));
        self
    }

    pub fn push_error(&mut self, error: SourceError) -> &mut Self {
        self.script.push_back(Err(error));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PoseSource for ScriptedSource {
    async fn estimate(&mut self) -> Result<Detection, SourceError> {
        self.script.pop_front().unwrap_or(Err(SourceError::Exhausted))
    }
}
