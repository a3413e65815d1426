use crate::spec::ChartSpec;

/// Area chart for the temperature channel, in degrees Celsius.
#[derive(Debug, Default)]
pub struct TemperatureChart;

impl TemperatureChart {
    pub fn new() -> Self {
        Self
    }

    pub fn spec(&self) -> ChartSpec {
        ChartSpec {
            container: "temperature-chart".to_string(),
            unit:      "℃".to_string(),
            y_min:     Some(15.0),
            ..ChartSpec::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_appends_celsius() {
        let spec = TemperatureChart::new().spec();
        assert_eq!(spec.tooltip(20.0), "20℃");
        assert_eq!(spec.tooltip(19.5), "19.5℃");
        assert_eq!(spec.y_min, Some(15.0));
    }
}
