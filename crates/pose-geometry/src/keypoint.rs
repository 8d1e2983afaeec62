//! Keypoints, the landmark scheme and per-frame samples

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Landmarks that must be present for the push-up predicates (up to right wrist)
pub const REQUIRED_LANDMARKS: usize = 11;

/// A single detected body landmark in source-frame pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Detection confidence (0-1)
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }

    /// Whether the detection meets the confidence floor
    pub fn is_confident(&self, min_confidence: f32) -> bool {
        self.score >= min_confidence
    }
}

/// COCO-17 landmark ordering, as emitted by MoveNet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl Landmark {
    /// Landmarks read by the push-up predicates
    pub const ARMS: [Landmark; 6] = [
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
    ];

    /// Position in the upstream keypoint array
    pub fn index(self) -> usize {
        self as usize
    }

    /// Keypoint name used by the upstream model
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Check an upstream model's keypoint names against the indices we rely on
    pub fn validate_schema<S: AsRef<str>>(names: &[S]) -> Result<(), GeometryError> {
        if names.len() < REQUIRED_LANDMARKS {
            return Err(GeometryError::SampleTooShort {
                required: REQUIRED_LANDMARKS,
                found: names.len(),
            });
        }

        for landmark in Self::ARMS {
            let found = names[landmark.index()].as_ref();
            if found != landmark.name() {
                return Err(GeometryError::SchemaMismatch {
                    index: landmark.index(),
                    expected: landmark.name(),
                    found: found.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Keypoints from one detection cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub keypoints: Vec<Keypoint>,
}

impl FrameSample {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Build a sample from a flat `[x, y, score, x, y, score, ...]` buffer
    pub fn from_flat(data: &[f32]) -> Result<Self, GeometryError> {
        if data.len() % 3 != 0 {
            return Err(GeometryError::InvalidLength(data.len()));
        }

        let count = data.len() / 3;
        if count < REQUIRED_LANDMARKS {
            return Err(GeometryError::SampleTooShort {
                required: REQUIRED_LANDMARKS,
                found: count,
            });
        }

        let keypoints = data
            .chunks_exact(3)
            .enumerate()
            .map(|(index, chunk)| {
                if chunk.iter().all(|v| v.is_finite()) {
                    Ok(Keypoint::new(chunk[0], chunk[1], chunk[2]))
                } else {
                    Err(GeometryError::NonFinite { index })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { keypoints })
    }

    /// Keypoint for a landmark, if the sample is long enough
    pub fn get(&self, landmark: Landmark) -> Option<&Keypoint> {
        self.keypoints.get(landmark.index())
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}
