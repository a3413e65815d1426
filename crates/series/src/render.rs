use board_config::BoardConfig;
use board_core::{Result, SeriesSnapshot};

/// Render collaborator notified after every accepted sample.
///
/// Sinks receive an owned snapshot, never the live buffer, so a slow sink can
/// hold on to it while the next sample is appended.  How the snapshot is drawn
/// (terminal, JSON, a browser chart) is entirely up to the implementation.
pub trait RenderSink: Send + std::fmt::Debug {
    /// Draw `snapshot` for its channel.
    fn render(&mut self, snapshot: &SeriesSnapshot) -> Result<()>;

    /// Called once when a channel is torn down.
    fn closed(&mut self, _channel: &str) {}

    /// Called after a reloaded config has been applied to the channels.
    fn reconfigure(&mut self, _config: &BoardConfig) {}
}
