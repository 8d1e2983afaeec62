//! Layered settings: defaults, optional file, then environment

use config::{Config, Environment, File};
use rep_counter::CounterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::RunnerError;

/// Environment prefix, e.g. `PUSHUP__COUNTER__ANGLE_UP_DEG=150`
pub const ENV_PREFIX: &str = "PUSHUP";

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Cycle rate; matches a display refresh loop (Hz)
    pub frame_rate_hz: f64,
    /// Bound of the report channel to the presentation layer
    pub report_capacity: usize,
    /// Emit logs as JSON lines
    pub json_logs: bool,
    /// Log per-frame readings
    pub verbose: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60.0,
            report_capacity: 64,
            json_logs: false,
            verbose: false,
        }
    }
}

impl RunnerConfig {
    /// Time between cycle starts
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate_hz)
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        if !(self.frame_rate_hz.is_finite() && self.frame_rate_hz > 0.0) {
            return Err(RunnerError::Config(format!(
                "frame_rate_hz must be positive, got {}",
                self.frame_rate_hz
            )));
        }
        if self.report_capacity == 0 {
            return Err(RunnerError::Config("report_capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub counter: CounterConfig,
    pub runner: RunnerConfig,
}

impl Settings {
    /// Load settings using the standard environment prefix
    pub fn load(path: Option<&Path>) -> Result<Self, RunnerError> {
        Self::load_from(path, ENV_PREFIX)
    }

    /// Load settings from defaults, an optional file and `{prefix}__` variables
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> Result<Self, RunnerError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = path {
            info!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        self.counter.validate()?;
        self.runner.validate()
    }
}
