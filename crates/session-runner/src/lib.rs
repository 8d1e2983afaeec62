//! Push-up Session Runner
//!
//! Frame-driven loop tying a pose source to the rep counter:
//! - Pose source trait with scripted and replay implementations
//! - Session loop with end signal and bounded report channel
//! - Layered settings (defaults, file, environment)

pub mod replay;
pub mod runner;
pub mod settings;
pub mod source;

pub use replay::ReplaySource;
pub use runner::{SessionHandle, SessionRunner, SessionSummary};
pub use settings::{RunnerConfig, Settings, ENV_PREFIX};
pub use source::{Detection, PoseSource, ScriptedSource, SourceError};

use rep_counter::CounterError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Runner error types
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Counter error: {0}")]
    Counter(#[from] CounterError),

    #[error("Pose source error: {0}")]
    Source(#[from] SourceError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging to stderr; stdout carries the frame reports
pub fn init_logging(json: bool, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.expect("Failed to set tracing subscriber");
}
