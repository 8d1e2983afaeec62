//! Push-up Counter - Main Entry Point
//!
//! Usage: `pushup-counter <estimates.jsonl> [settings.toml]`
//!
//! Frame reports go to stdout as JSON lines, followed by the session summary.

use anyhow::{bail, Context};
use session_runner::{init_logging, ReplaySource, SessionHandle, SessionRunner, Settings};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(estimates) = args.next().map(PathBuf::from) else {
        bail!("usage: pushup-counter <estimates.jsonl> [settings.toml]");
    };
    let settings_path = args.next().map(PathBuf::from);

    let settings = Settings::load(settings_path.as_deref()).context("Failed to load settings")?;
    init_logging(settings.runner.json_logs, settings.runner.verbose);

    info!("=== Push-up Counter v{} ===", env!("CARGO_PKG_VERSION"));

    let mut source = ReplaySource::open(&estimates)
        .await
        .with_context(|| format!("Failed to open {}", estimates.display()))?;

    let (report_tx, mut report_rx) = mpsc::channel(settings.runner.report_capacity);
    let printer = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            match serde_json::to_string(&report) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to encode frame report: {}", e),
            }
        }
    });

    let (handle, end) = SessionHandle::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.end_session();
        }
    });

    let mut runner = SessionRunner::new(settings.counter, settings.runner)?;
    let summary = runner.run(&mut source, report_tx, end).await?;
    printer.await.context("Report printer failed")?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
