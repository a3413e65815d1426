//! sensorboard — live rolling charts for sensor readings.
//!
//! Reads `(channel, timestamp, value)` readings from stdin (or the configured
//! input), keeps a bounded window per channel and prints one JSON chart
//! payload per accepted sample.
//!
//! Run with:  `RUST_LOG=info sensorboard [config.toml]`

use anyhow::{Context, Result};
use board_charts::{ChartSet, JsonLinesSink};
use board_config::{default_path, load as load_config, ConfigWatcher, SourceKind};
use board_core::Message;
use board_ingest::{spawn_frame_reader, spawn_line_reader};
use board_series::{spawn_dashboard, Dashboard};
use tokio::io::AsyncRead;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the chart payloads.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("sensorboard v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args_os()
        .nth(1)
        .map(Into::into)
        .unwrap_or_else(default_path);
    let config = load_config(&config_path)?;

    let sink = JsonLinesSink::new(ChartSet::from_config(&config), std::io::stdout());
    let dashboard = Dashboard::new(&config, sink)?;
    let (events, dashboard) = spawn_dashboard(dashboard, Some(config_path.clone()));

    let _watcher = config_path
        .exists()
        .then(|| ConfigWatcher::spawn(&config_path, events.clone()));

    let input: Box<dyn AsyncRead + Unpin + Send> = match config.global.input.as_str() {
        "-" => Box::new(tokio::io::stdin()),
        path => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open input '{path}'"))?,
        ),
    };

    let reader = match config.global.source {
        SourceKind::Lines => spawn_line_reader(input, events.clone()),
        SourceKind::Frames => spawn_frame_reader(input, events.clone()),
    };

    // A failed input stream ends ingestion but still shuts the charts down
    // cleanly.
    tokio::select! {
        res = reader => match res.context("reader task panicked")? {
            Ok(()) => {}
            Err(e) => tracing::error!("input stopped: {e}"),
        },
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    // The loop may already be gone if every sender dropped; that is fine.
    let _ = events.send(Message::Shutdown).await;
    drop(events);
    dashboard.await.context("dashboard task panicked")?;

    Ok(())
}
