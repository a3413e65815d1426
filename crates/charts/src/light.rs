use crate::spec::ChartSpec;

/// Area chart for the light channel, in lux.
#[derive(Debug, Default)]
pub struct LightChart;

impl LightChart {
    pub fn new() -> Self {
        Self
    }

    pub fn spec(&self) -> ChartSpec {
        ChartSpec {
            container: "light-chart".to_string(),
            unit:      "lx".to_string(),
            y_min:     Some(100.0),
            ..ChartSpec::default()
        }
    }
}
