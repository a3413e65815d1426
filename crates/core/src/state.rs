use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// One timestamped measurement.  Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Epoch seconds.
    timestamp: i64,
    value:     f64,
}

impl Sample {
    /// Build a validated sample.
    ///
    /// Fails with [`BoardError::InvalidSample`] for a negative timestamp or a
    /// value that is NaN or infinite.
    pub fn new(timestamp: i64, value: f64) -> Result<Self> {
        if timestamp < 0 {
            return Err(BoardError::InvalidSample(format!(
                "negative timestamp {timestamp}"
            )));
        }
        if !value.is_finite() {
            return Err(BoardError::InvalidSample(format!(
                "non-numeric value {value} at {timestamp}"
            )));
        }
        Ok(Self { timestamp, value })
    }

    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A raw reading as delivered by a sensor source, before validation.
///
/// Either field may be missing when the source sent a truncated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub channel:   String,
    pub timestamp: Option<i64>,
    pub value:     Option<f64>,
}

impl Reading {
    pub fn new(channel: impl Into<String>, timestamp: i64, value: f64) -> Self {
        Self {
            channel:   channel.into(),
            timestamp: Some(timestamp),
            value:     Some(value),
        }
    }

    /// Validate into a [`Sample`].
    pub fn sample(&self) -> Result<Sample> {
        let timestamp = self.timestamp.ok_or_else(|| {
            BoardError::InvalidSample(format!("'{}': missing timestamp", self.channel))
        })?;
        let value = self.value.ok_or_else(|| {
            BoardError::InvalidSample(format!("'{}': missing value", self.channel))
        })?;
        Sample::new(timestamp, value)
    }
}

/// Where the latest value sits relative to a channel's configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Below,
    #[default]
    Within,
    Above,
}

impl Level {
    /// Classify `value` against optional inclusive bounds.
    #[must_use]
    pub fn classify(value: f64, min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (Some(lo), _) if value < lo => Self::Below,
            (_, Some(hi)) if value > hi => Self::Above,
            _ => Self::Within,
        }
    }
}

/// Ordered copy of a channel's samples handed to a render sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    pub channel: String,
    pub samples: Vec<Sample>,
    pub level:   Level,
}

impl SeriesSnapshot {
    /// Most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }
}
