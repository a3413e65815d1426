use crate::state::Reading;

/// All messages that can flow into the dashboard event loop.
///
/// Sources:
/// - Ingest reader task   → `Reading`, `SensorFrame`
/// - Config watcher task  → `ConfigReloaded`
/// - Chart teardown       → `ChannelClosed`
#[derive(Debug, Clone)]
pub enum Message {
    /// A raw `(channel, timestamp, value)` triple from a sensor source.
    Reading(Reading),
    /// A binary-frame reading, resolved to a channel by its sensor id.
    SensorFrame {
        sensor_id: u8,
        timestamp: i64,
        value:     f64,
    },
    /// The chart for this channel was destroyed; later readings are ignored.
    ChannelClosed(String),
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,
    /// Graceful shutdown requested.
    Shutdown,
}
