use board_core::{Level, SeriesSnapshot};
use serde::Serialize;

/// Declarative configuration of one area chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Id of the element the chart is drawn into, e.g. `"light-chart"`.
    pub container:  String,
    pub width:      u32,
    pub height:     u32,
    /// Y-axis title and tooltip suffix.
    pub unit:       String,
    /// Lower bound of the y-axis; `None` lets the renderer pick.
    pub y_min:      Option<f64>,
    pub line_color: String,
    pub line_width: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            container:  "chart".to_string(),
            width:      320,
            height:     200,
            unit:       String::new(),
            y_min:      None,
            line_color: "#666666".to_string(),
            line_width: 1,
        }
    }
}

impl ChartSpec {
    /// Tooltip text for one point: the value followed by the unit.
    #[must_use]
    pub fn tooltip(&self, value: f64) -> String {
        format!("{value}{}", self.unit)
    }

    /// Build the render payload for `snapshot`.
    ///
    /// Categories are the sample timestamps as epoch-second strings, one per
    /// point, so the x-axis stays aligned with the data series.
    #[must_use]
    pub fn payload(&self, snapshot: &SeriesSnapshot) -> ChartPayload {
        let samples = &snapshot.samples;
        ChartPayload {
            channel:    snapshot.channel.clone(),
            container:  self.container.clone(),
            kind:       "area",
            width:      self.width,
            height:     self.height,
            unit:       self.unit.clone(),
            y_min:      self.y_min,
            line_color: self.line_color.clone(),
            line_width: self.line_width,
            categories: samples.iter().map(|s| s.timestamp().to_string()).collect(),
            data:       samples.iter().map(|s| s.value()).collect(),
            tooltips:   samples.iter().map(|s| self.tooltip(s.value())).collect(),
            level:      snapshot.level,
        }
    }
}

/// Everything a chart front-end needs to redraw one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub channel:    String,
    pub container:  String,
    #[serde(rename = "type")]
    pub kind:       &'static str,
    pub width:      u32,
    pub height:     u32,
    pub unit:       String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_min:      Option<f64>,
    pub line_color: String,
    pub line_width: u32,
    pub categories: Vec<String>,
    pub data:       Vec<f64>,
    pub tooltips:   Vec<String>,
    pub level:      Level,
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::Sample;

    #[test]
    fn payload_aligns_categories_with_data() {
        let spec = ChartSpec {
            unit: "lx".to_string(),
            ..ChartSpec::default()
        };
        let snapshot = SeriesSnapshot {
            channel: "light".to_string(),
            samples: vec![
                Sample::new(1479305312, 120.0).unwrap(),
                Sample::new(1479305372, 135.5).unwrap(),
            ],
            level:   Level::Within,
        };

        let p = spec.payload(&snapshot);
        assert_eq!(p.categories, vec!["1479305312", "1479305372"]);
        assert_eq!(p.data, vec![120.0, 135.5]);
        assert_eq!(p.tooltips, vec!["120lx", "135.5lx"]);
        assert_eq!(p.kind, "area");
    }
}
