pub mod buffer;
pub mod dashboard;
pub mod render;

pub use buffer::{Append, RollingSeriesBuffer};
pub use dashboard::{Channel, Dashboard};
pub use render::RenderSink;

use board_core::{Message, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, error, info, warn};

/// Spawn the dashboard event loop on a background Tokio task.
///
/// Every mutation happens on that one task, in arrival order.  Charts whose
/// render failed are retried once a second until the sink accepts them.
/// Returns the sender feeding the loop and a handle that yields the dashboard
/// back once the loop ends (on [`Message::Shutdown`] or when every sender is
/// dropped).
///
/// `config_path` is re-read on [`Message::ConfigReloaded`]; `None` ignores
/// reload requests.
pub fn spawn_dashboard<S>(
    dashboard: Dashboard<S>,
    config_path: Option<PathBuf>,
) -> (mpsc::Sender<Message>, JoinHandle<Dashboard<S>>)
where
    S: RenderSink + 'static,
{
    let (tx, rx) = mpsc::channel(64);
    let handle = tokio::spawn(run(dashboard, rx, config_path));
    (tx, handle)
}

/// How often channels whose last render failed are drawn again.
const RETRY_INTERVAL: Duration = Duration::from_secs(1);

async fn run<S: RenderSink>(
    mut dashboard: Dashboard<S>,
    mut rx: mpsc::Receiver<Message>,
    config_path: Option<PathBuf>,
) -> Dashboard<S> {
    let mut retry = time::interval(RETRY_INTERVAL);
    retry.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

    loop {
        let message = tokio::select! {
            message = rx.recv() => match message {
                Some(message) => message,
                None => break, // every sender dropped
            },
            _ = retry.tick() => {
                let pending = dashboard.render_dirty();
                if pending > 0 {
                    debug!(pending, "charts still waiting for a successful render");
                }
                continue;
            }
        };

        match message {
            Message::Reading(reading) => {
                report(&reading.channel, dashboard.ingest(&reading));
            }
            Message::SensorFrame {
                sensor_id,
                timestamp,
                value,
            } => {
                let source = format!("sensor {sensor_id}");
                report(&source, dashboard.ingest_sensor(sensor_id, timestamp, value));
            }
            Message::ChannelClosed(name) => {
                if let Err(e) = dashboard.close(&name) {
                    warn!("cannot close chart: {e}");
                }
            }
            Message::ConfigReloaded => {
                let Some(path) = config_path.as_ref() else {
                    continue;
                };
                match board_config::load(path).and_then(|cfg| dashboard.apply_config(&cfg)) {
                    Ok(()) => info!("config reloaded from '{}'", path.display()),
                    Err(e) => warn!("config reload failed, keeping current charts: {e}"),
                }
            }
            Message::Shutdown => break,
        }
    }

    info!("dashboard event loop stopped");
    dashboard
}

fn report(source: &str, outcome: Result<Append>) {
    match outcome {
        Ok(_) => {}
        Err(e) if e.is_rejection() => warn!(source, "sample rejected: {e}"),
        Err(e) => error!(source, "ingest failed: {e}"),
    }
}
