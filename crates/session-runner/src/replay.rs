//! Replay of recorded pose estimates
//!
//! One JSON object per line, shaped like pose-detector output:
//!
//! ```text
//! {"poses":[{"keypoints":[{"x":312.0,"y":140.5,"score":0.91,"name":"nose"}, ...]}]}
//! {"poses":[{"keypoints":[312.0,140.5,0.91, ...]}]}
//! {"poses":[]}
//! {"error":"backend lost"}
//! ```
//!
//! Keypoints are either named records or a flat `x, y, score` array. An empty
//! `poses` list means nobody was detected; only the first pose is used.

use pose_geometry::{FrameSample, Keypoint, Landmark};
use serde::Deserialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info};

use crate::source::{Detection, PoseSource, SourceError};

#[derive(Debug, Deserialize)]
struct EstimateLine {
    #[serde(default)]
    poses: Vec<RecordedPose>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordedPose {
    keypoints: RecordedKeypoints,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedKeypoints {
    Named(Vec<NamedKeypoint>),
    Flat(Vec<f32>),
}

#[derive(Debug, Deserialize)]
struct NamedKeypoint {
    x: f32,
    y: f32,
    score: f32,
    #[serde(default)]
    name: Option<String>,
}

/// Pose source reading recorded estimates line by line
pub struct ReplaySource<R> {
    lines: Lines<R>,
    line_no: usize,
    schema_checked: bool,
    done: bool,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording; failing here is the one terminal error of a session
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        info!("Replaying pose estimates from {}", path.display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            schema_checked: false,
            done: false,
        }
    }

    /// Lines consumed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn decode(&mut self, line: &str) -> Result<Detection, SourceError> {
        let estimate: EstimateLine =
            serde_json::from_str(line).map_err(|e| SourceError::Parse {
                line: self.line_no,
                message: e.to_string(),
            })?;

        if let Some(error) = estimate.error {
            return Err(SourceError::Inference(error));
        }

        let Some(pose) = estimate.poses.into_iter().next() else {
            return Ok(Detection::NoSubject);
        };

        let sample = match pose.keypoints {
            RecordedKeypoints::Named(keypoints) => {
                self.check_schema(&keypoints)?;
                FrameSample::new(
                    keypoints
                        .iter()
                        .map(|k| Keypoint::new(k.x, k.y, k.score))
                        .collect(),
                )
            }
            RecordedKeypoints::Flat(values) => FrameSample::from_flat(&values)?,
        };

        Ok(Detection::Subject(sample))
    }

    /// Validate landmark names once, on the first fully named pose
    fn check_schema(&mut self, keypoints: &[NamedKeypoint]) -> Result<(), SourceError> {
        if self.schema_checked {
            return Ok(());
        }

        let names: Option<Vec<&str>> = keypoints.iter().map(|k| k.name.as_deref()).collect();
        if let Some(names) = names.filter(|n| !n.is_empty()) {
            Landmark::validate_schema(&names)?;
            self.schema_checked = true;
            debug!("Landmark schema validated on line {}", self.line_no);
        }
        Ok(())
    }
}

impl<R: AsyncBufRead + Unpin + Send> PoseSource for ReplaySource<R> {
    async fn estimate(&mut self) -> Result<Detection, SourceError> {
        if self.done {
            return Err(SourceError::Exhausted);
        }

        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.done = true;
                    return Err(SourceError::Exhausted);
                }
                Err(e) => {
                    // Report once; the recording is unreadable from here on
                    self.done = true;
                    return Err(e.into());
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }
            return self.decode(&line);
        }
    }
}
