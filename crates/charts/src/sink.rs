use crate::ChartSet;
use board_config::BoardConfig;
use board_core::{BoardError, Result, SeriesSnapshot};
use board_series::RenderSink;
use serde_json::json;
use std::io::Write;
use tracing::{info, warn};

/// Render sink that writes one JSON chart payload per line.
///
/// A browser front-end (or anything else that speaks JSON) can redraw the
/// chart straight from each line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    charts: ChartSet,
    out:    W,
}

impl<W: Write + Send + std::fmt::Debug> JsonLinesSink<W> {
    pub fn new(charts: ChartSet, out: W) -> Self {
        Self { charts, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, value: &impl serde::Serialize) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)
            .map_err(|e| BoardError::Render(format!("encode payload: {e}")))?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send + std::fmt::Debug> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, snapshot: &SeriesSnapshot) -> Result<()> {
        let payload = self.charts.get(&snapshot.channel).payload(snapshot);
        self.write_line(&payload)
    }

    fn closed(&mut self, channel: &str) {
        info!(channel, "chart torn down");
        if let Err(e) = self.write_line(&json!({ "channel": channel, "closed": true })) {
            warn!(channel, "cannot announce closed chart: {e}");
        }
    }

    fn reconfigure(&mut self, config: &BoardConfig) {
        self.charts = ChartSet::from_config(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_config::{ChannelConfig, ChartKind};
    use board_core::{Level, Sample};
    use serde_json::Value;

    fn lines(buf: Vec<u8>) -> Vec<Value> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn writes_one_payload_per_render() {
        let charts = ChartSet::from_config(&BoardConfig::default());
        let mut sink = JsonLinesSink::new(charts, Vec::new());

        let snapshot = SeriesSnapshot {
            channel: "temperature".to_string(),
            samples: vec![
                Sample::new(1, 20.0).unwrap(),
                Sample::new(2, 21.5).unwrap(),
            ],
            level:   Level::Above,
        };
        sink.render(&snapshot).unwrap();
        sink.closed("temperature");

        let out = lines(sink.into_inner());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["container"], "temperature-chart");
        assert_eq!(out[0]["type"], "area");
        assert_eq!(out[0]["y_min"], 15.0);
        assert_eq!(out[0]["categories"], serde_json::json!(["1", "2"]));
        assert_eq!(out[0]["tooltips"][1], "21.5℃");
        assert_eq!(out[0]["level"], "above");
        assert_eq!(out[1]["closed"], true);
    }

    #[test]
    fn reconfigure_picks_up_new_chart_presets() {
        let charts = ChartSet::from_config(&BoardConfig::default());
        let mut sink = JsonLinesSink::new(charts, Vec::new());

        let mut config = BoardConfig::default();
        config
            .channels
            .push(ChannelConfig::new("greenhouse", ChartKind::Temperature));
        sink.reconfigure(&config);

        let snapshot = SeriesSnapshot {
            channel: "greenhouse".to_string(),
            samples: vec![Sample::new(60, 18.5).unwrap()],
            level:   Level::Within,
        };
        sink.render(&snapshot).unwrap();

        let out = lines(sink.into_inner());
        assert_eq!(out[0]["container"], "greenhouse-chart");
        assert_eq!(out[0]["unit"], "℃");
        assert_eq!(out[0]["y_min"], 15.0);
        assert_eq!(out[0]["tooltips"][0], "18.5℃");
    }
}
