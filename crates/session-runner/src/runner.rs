//! Workout session loop
//!
//! One cycle per timer tick: await a single pose inference, feed the
//! counter, publish the frame report. A cycle always completes before the
//! next tick is taken, so a slow inference just delays the following cycle.

use rep_counter::{CounterConfig, FrameReport, PositionState, RepCounter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::settings::RunnerConfig;
use crate::source::{Detection, PoseSource, SourceError};
use crate::RunnerError;

/// Sends the end-of-session signal to a running loop
///
/// Dropping the handle also ends the session.
#[derive(Debug)]
pub struct SessionHandle {
    end_tx: watch::Sender<bool>,
}

impl SessionHandle {
    /// Create a handle and the receiver to pass to [`SessionRunner::run`]
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (end_tx, end_rx) = watch::channel(false);
        (Self { end_tx }, end_rx)
    }

    /// Stop scheduling further cycles; an in-flight cycle still completes
    pub fn end_session(&self) {
        info!("End of session requested");
        self.end_tx.send_replace(true);
    }
}

/// Totals reported when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Final push-up count
    pub reps: u32,
    /// Cycles that produced a sample and ran the counter
    pub frames_processed: u64,
    /// Cycles skipped because inference failed or found nobody
    pub frames_skipped: u64,
    pub final_position: PositionState,
    pub elapsed_ms: u64,
}

/// Consecutive cycles without a usable sample
///
/// Only the first cycle of a run is a warning; the rest go to debug so an
/// empty frame at 60 Hz does not flood the log.
#[derive(Debug, Default)]
struct SkipStreak {
    cycles: u64,
}

impl SkipStreak {
    /// Record a skipped cycle; true if it was logged as a warning
    fn skip(&mut self, reason: &dyn fmt::Display) -> bool {
        self.cycles += 1;
        if self.cycles == 1 {
            warn!("{}, skipping cycles until detection resumes", reason);
            true
        } else {
            debug!("{}, skipping cycle ({} in a row)", reason, self.cycles);
            false
        }
    }

    /// A sample arrived; returns the length of the streak it ended
    fn resume(&mut self) -> u64 {
        let cycles = std::mem::take(&mut self.cycles);
        if cycles > 0 {
            info!("Detection resumed after {} skipped cycles", cycles);
        }
        cycles
    }
}

/// Drives a [`RepCounter`] from a [`PoseSource`]
pub struct SessionRunner {
    counter: RepCounter,
    config: RunnerConfig,
}

impl SessionRunner {
    pub fn new(counter_config: CounterConfig, config: RunnerConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        Ok(Self {
            counter: RepCounter::new(counter_config)?,
            config,
        })
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    /// Start over with a fresh session state (restart button)
    pub fn restart(&mut self) {
        self.counter.reset_state();
    }

    /// Run cycles until the end signal, the end of the stream, or a fatal source error
    ///
    /// Reports are offered with `try_send`; a slow consumer loses reports
    /// instead of stalling the loop.
    pub async fn run<S: PoseSource>(
        &mut self,
        source: &mut S,
        reports: mpsc::Sender<FrameReport>,
        mut end: watch::Receiver<bool>,
    ) -> Result<SessionSummary, RunnerError> {
        info!(
            "Starting workout session at {:.1} Hz",
            self.config.frame_rate_hz
        );

        let started = Instant::now();
        let mut ticker = interval(self.config.frame_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut frames_processed = 0u64;
        let mut frames_skipped = 0u64;
        let mut streak = SkipStreak::default();

        loop {
            tokio::select! {
                biased;
                _ = end.wait_for(|ended| *ended) => break,
                _ = ticker.tick() => {}
            }

            match source.estimate().await {
                Ok(Detection::Subject(sample)) => {
                    streak.resume();
                    let report = self.counter.process(&sample);
                    frames_processed += 1;

                    if let Err(e) = reports.try_send(report) {
                        debug!("Frame report not delivered: {}", e);
                    }
                }
                Ok(Detection::NoSubject) => {
                    frames_skipped += 1;
                    streak.skip(&"No subject detected");
                }
                Err(SourceError::Exhausted) => {
                    info!("Pose stream ended");
                    break;
                }
                Err(e) if e.is_fatal() => {
                    warn!("Stopping session: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    frames_skipped += 1;
                    streak.skip(&format_args!("Pose estimation unavailable ({})", e));
                }
            }
        }

        let summary = SessionSummary {
            reps: self.counter.reps(),
            frames_processed,
            frames_skipped,
            final_position: self.counter.position(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            "Session finished: {} push-ups ({} frames, {} skipped)",
            summary.reps, summary.frames_processed, summary.frames_skipped
        );
        Ok(summary)
    }
}
