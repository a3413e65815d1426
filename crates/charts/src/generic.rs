use crate::spec::ChartSpec;

/// Unit-less area chart for any other channel.  The y-axis scales
/// automatically unless the channel config pins a minimum.
#[derive(Debug)]
pub struct GenericChart {
    channel: String,
}

impl GenericChart {
    pub fn new(channel: impl Into<String>) -> Self {
        Self { channel: channel.into() }
    }

    pub fn spec(&self) -> ChartSpec {
        ChartSpec {
            container: format!("{}-chart", self.channel),
            ..ChartSpec::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_follows_channel_name() {
        let spec = GenericChart::new("humidity").spec();
        assert_eq!(spec.container, "humidity-chart");
        assert_eq!(spec.tooltip(41.0), "41");
        assert_eq!(spec.y_min, None);
    }
}
