//! Chart presets and render sinks for the sensor dashboard.
//!
//! Each channel is drawn with one of three presets (temperature, light,
//! generic).  Per-channel config may override the preset's unit and y-axis
//! minimum.

pub mod generic;
pub mod light;
pub mod sink;
pub mod spec;
pub mod temperature;

pub use generic::GenericChart;
pub use light::LightChart;
pub use sink::JsonLinesSink;
pub use spec::{ChartPayload, ChartSpec};
pub use temperature::TemperatureChart;

use board_config::{BoardConfig, ChannelConfig, ChartKind};
use std::collections::HashMap;

/// Resolve the chart spec for one configured channel.
pub fn spec_for(channel: &ChannelConfig) -> ChartSpec {
    let mut spec = match channel.kind {
        ChartKind::Temperature => TemperatureChart::new().spec(),
        ChartKind::Light => LightChart::new().spec(),
        ChartKind::Generic => GenericChart::new(&channel.name).spec(),
    };
    spec.container = format!("{}-chart", channel.name);
    if let Some(unit) = &channel.unit {
        spec.unit = unit.clone();
    }
    if channel.y_min.is_some() {
        spec.y_min = channel.y_min;
    }
    spec
}

/// Chart specs for every configured channel, keyed by channel name.
#[derive(Debug, Clone, Default)]
pub struct ChartSet {
    specs: HashMap<String, ChartSpec>,
}

impl ChartSet {
    pub fn from_config(config: &BoardConfig) -> Self {
        let specs = config
            .channels
            .iter()
            .map(|ch| (ch.name.clone(), spec_for(ch)))
            .collect();
        Self { specs }
    }

    /// Spec for `channel`; channels without config get the generic preset.
    pub fn get(&self, channel: &str) -> ChartSpec {
        self.specs
            .get(channel)
            .cloned()
            .unwrap_or_else(|| GenericChart::new(channel).spec())
    }
}
