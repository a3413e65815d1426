use board_core::Message;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Watches the config file and posts [`Message::ConfigReloaded`] into the
/// dashboard event loop on every write.
///
/// # Example
/// ```no_run
/// # async fn demo(tx: tokio::sync::mpsc::Sender<board_core::Message>) {
/// let watcher = board_config::ConfigWatcher::spawn("/home/user/.config/sensorboard/sensorboard.toml", tx);
/// println!("watching {}", watcher.path().display());
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path` that forwards change
    /// notifications to `events`.  The task ends once `events` is closed.
    pub fn spawn(path: impl AsRef<Path>, events: mpsc::Sender<Message>) -> Self {
        let path = path.as_ref().to_path_buf();
        tokio::spawn(watch_loop(path.clone(), events));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, events: mpsc::Sender<Message>) {
    use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", path.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) if matches!(e.kind, EventKind::Modify(_) | EventKind::Create(_)) => {
                if events.send(Message::ConfigReloaded).await.is_err() {
                    break; // dashboard gone
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}
