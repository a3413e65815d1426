use board_core::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root configuration structure parsed from `sensorboard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Settings shared by every channel.
    pub global: GlobalConfig,
    /// One entry per monitored channel / chart.
    pub channels: Vec<ChannelConfig>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            global:   GlobalConfig::default(),
            channels: vec![
                ChannelConfig {
                    sensor_id: Some(3),
                    ..ChannelConfig::new("temperature", ChartKind::Temperature)
                },
                ChannelConfig {
                    sensor_id: Some(5),
                    ..ChannelConfig::new("light", ChartKind::Light)
                },
            ],
        }
    }
}

impl BoardConfig {
    /// Reject configs the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.global.capacity == 0 {
            return Err(BoardError::Config("global.capacity must be at least 1".into()));
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for ch in &self.channels {
            if ch.name.trim().is_empty() {
                return Err(BoardError::Config("channel name must not be empty".into()));
            }
            if !names.insert(ch.name.as_str()) {
                return Err(BoardError::Config(format!("duplicate channel '{}'", ch.name)));
            }
            if ch.capacity == Some(0) {
                return Err(BoardError::Config(format!(
                    "channel '{}': capacity must be at least 1",
                    ch.name
                )));
            }
            if let Some(id) = ch.sensor_id {
                if !ids.insert(id) {
                    return Err(BoardError::Config(format!(
                        "channel '{}': sensor_id {id} already in use",
                        ch.name
                    )));
                }
            }
            if let (Some(lo), Some(hi)) = (ch.min_value, ch.max_value) {
                if lo > hi {
                    return Err(BoardError::Config(format!(
                        "channel '{}': min_value {lo} exceeds max_value {hi}",
                        ch.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Visible point count for `channel`, falling back to the global default.
    #[must_use]
    pub fn capacity_of(&self, channel: &ChannelConfig) -> usize {
        channel.capacity.unwrap_or(self.global.capacity)
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Channel bound to a binary-frame sensor id.
    pub fn channel_for_sensor(&self, id: u8) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.sensor_id == Some(id))
    }
}

/// Global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default number of visible points per chart.
    pub capacity: usize,
    /// Wire format of the inbound reading stream.
    pub source: SourceKind,
    /// Input path; `"-"` reads standard input.
    pub input: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            capacity: 7,
            source:   SourceKind::Lines,
            input:    "-".to_string(),
        }
    }
}

/// Inbound stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `channel timestamp value` text lines.
    #[default]
    Lines,
    /// 5-byte binary sensor frames.
    Frames,
}

/// Which chart preset renders the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Temperature,
    Light,
    #[default]
    Generic,
}

/// Config block for a single channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel identifier, e.g. `"temperature"`.
    pub name: String,
    #[serde(default)]
    pub kind: ChartKind,
    /// Overrides `global.capacity`.
    #[serde(default)]
    pub capacity: Option<usize>,
    /// Y-axis unit suffix; defaults to the chart preset's unit.
    #[serde(default)]
    pub unit: Option<String>,
    /// Y-axis minimum; defaults to the chart preset's minimum.
    #[serde(default)]
    pub y_min: Option<f64>,
    /// Values below this are reported as `below`.
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Values above this are reported as `above`.
    #[serde(default)]
    pub max_value: Option<f64>,
    /// Id carried in byte 0 of binary sensor frames.
    #[serde(default)]
    pub sensor_id: Option<u8>,
}

impl ChannelConfig {
    pub fn new(name: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            name: name.into(),
            kind,
            capacity:  None,
            unit:      None,
            y_min:     None,
            min_value: None,
            max_value: None,
            sensor_id: None,
        }
    }
}
