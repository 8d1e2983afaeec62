//! Geometry Error Types

use thiserror::Error;

/// Errors raised while ingesting or validating keypoint data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Flat buffer is not made of (x, y, score) triples
    #[error("Invalid landmark buffer length: {0} (expected a multiple of 3)")]
    InvalidLength(usize),

    /// Sample does not reach the landmarks the counter needs
    #[error("Sample has {found} landmarks, at least {required} required")]
    SampleTooShort { required: usize, found: usize },

    /// Upstream model uses a different landmark ordering
    #[error("Landmark {index} is {found:?}, expected {expected:?}")]
    SchemaMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },

    /// NaN or infinite value in the incoming data
    #[error("Non-finite value for landmark {index}")]
    NonFinite { index: usize },
}
