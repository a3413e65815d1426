use crate::buffer::{Append, RollingSeriesBuffer};
use crate::render::RenderSink;
use board_config::{BoardConfig, ChannelConfig};
use board_core::{BoardError, Level, Reading, Result, Sample, SeriesSnapshot};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A monitored channel: its config, its buffer and the last reported level.
#[derive(Debug)]
pub struct Channel {
    config: ChannelConfig,
    buffer: RollingSeriesBuffer,
    level:  Level,
}

impl Channel {
    fn new(config: ChannelConfig, capacity: usize) -> Result<Self> {
        let buffer = RollingSeriesBuffer::new(config.name.clone(), capacity)?;
        Ok(Self {
            config,
            buffer,
            level: Level::default(),
        })
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn buffer(&self) -> &RollingSeriesBuffer {
        &self.buffer
    }

    pub fn level(&self) -> Level {
        self.level
    }

    fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            channel: self.config.name.clone(),
            samples: self.buffer.snapshot(),
            level:   self.level,
        }
    }
}

/// Owns one [`RollingSeriesBuffer`] per channel and pushes a fresh snapshot
/// to the render sink after every accepted sample.
#[derive(Debug)]
pub struct Dashboard<S> {
    channels: BTreeMap<String, Channel>,
    sink:     S,
}

impl<S: RenderSink> Dashboard<S> {
    /// Build a channel (and its empty buffer) for every configured chart.
    pub fn new(config: &BoardConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let mut channels = BTreeMap::new();
        for ch in &config.channels {
            let capacity = config.capacity_of(ch);
            info!(channel = %ch.name, capacity, "chart initialised");
            channels.insert(ch.name.clone(), Channel::new(ch.clone(), capacity)?);
        }
        Ok(Self { channels, sink })
    }

    /// Validate `reading`, append it to its channel and render.
    ///
    /// Rejections (`UnknownChannel`, `InvalidSample`, `OutOfOrderSample`) are
    /// returned to the caller; the channel keeps accepting later samples.
    /// A render failure is logged and leaves the buffer dirty.
    pub fn ingest(&mut self, reading: &Reading) -> Result<Append> {
        let channel = self
            .channels
            .get_mut(&reading.channel)
            .ok_or_else(|| BoardError::UnknownChannel(reading.channel.clone()))?;

        if !channel.buffer.is_active() {
            debug!(channel = %reading.channel, "reading for closed channel ignored");
            return Ok(Append::Ignored);
        }

        let sample = reading.sample()?;
        let outcome = channel.buffer.append(sample)?;

        let level = Level::classify(
            sample.value(),
            channel.config.min_value,
            channel.config.max_value,
        );
        if level != channel.level {
            info!(
                channel = %reading.channel,
                value = sample.value(),
                from = ?channel.level,
                to = ?level,
                "level changed"
            );
            channel.level = level;
        }

        render(&mut self.sink, channel);
        Ok(outcome)
    }

    /// Route a binary-frame reading to the channel configured with
    /// `sensor_id`, then ingest it like any other reading.
    pub fn ingest_sensor(&mut self, sensor_id: u8, timestamp: i64, value: f64) -> Result<Append> {
        let name = self
            .channels
            .values()
            .find(|c| c.config.sensor_id == Some(sensor_id))
            .map(|c| c.config.name.clone())
            .ok_or_else(|| BoardError::UnknownChannel(format!("sensor id {sensor_id}")))?;
        self.ingest(&Reading::new(name, timestamp, value))
    }

    /// Re-render every active channel whose last render failed.
    ///
    /// Returns how many channels are still dirty afterwards.
    pub fn render_dirty(&mut self) -> usize {
        let mut still_dirty = 0;
        for channel in self.channels.values_mut() {
            if channel.buffer.is_active() && channel.buffer.is_dirty() {
                render(&mut self.sink, channel);
                if channel.buffer.is_dirty() {
                    still_dirty += 1;
                }
            }
        }
        still_dirty
    }

    /// Tear down a channel's chart.  Readings for it are ignored from now on.
    pub fn close(&mut self, name: &str) -> Result<()> {
        let channel = self
            .channels
            .get_mut(name)
            .ok_or_else(|| BoardError::UnknownChannel(name.to_string()))?;
        if channel.buffer.is_active() {
            channel.buffer.close();
            self.sink.closed(name);
            info!(channel = %name, "chart closed");
        }
        Ok(())
    }

    /// Apply a reloaded config.
    ///
    /// New channels are created, removed channels are closed and dropped, and
    /// channels whose capacity changed get a fresh buffer seeded with their
    /// most recent samples.  Closed channels stay closed.
    pub fn apply_config(&mut self, config: &BoardConfig) -> Result<()> {
        config.validate()?;

        let removed: Vec<String> = self
            .channels
            .keys()
            .filter(|name| config.channel(name).is_none())
            .cloned()
            .collect();
        for name in removed {
            self.close(&name)?;
            self.channels.remove(&name);
        }

        for ch in &config.channels {
            let capacity = config.capacity_of(ch);
            match self.channels.get_mut(&ch.name) {
                None => {
                    info!(channel = %ch.name, capacity, "chart added");
                    self.channels
                        .insert(ch.name.clone(), Channel::new(ch.clone(), capacity)?);
                }
                Some(existing) => {
                    if existing.buffer.capacity() != capacity {
                        existing.buffer = reseed(&existing.buffer, capacity)?;
                        info!(channel = %ch.name, capacity, "chart resized");
                    }
                    existing.config = ch.clone();
                }
            }
        }

        self.sink.reconfigure(config);
        Ok(())
    }

    /// Most recent sample for `channel`.
    pub fn latest(&self, channel: &str) -> Option<Sample> {
        self.channels.get(channel)?.buffer.latest()
    }

    /// Current snapshot for `channel`.
    pub fn snapshot(&self, channel: &str) -> Option<SeriesSnapshot> {
        self.channels.get(channel).map(Channel::snapshot)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    /// Channel names in sorted order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Push `channel`'s snapshot to `sink`.  The buffer stays dirty if the sink
/// fails so a later [`Dashboard::render_dirty`] pass can retry.
fn render<S: RenderSink>(sink: &mut S, channel: &mut Channel) {
    match sink.render(&channel.snapshot()) {
        Ok(()) => {
            channel.buffer.take_dirty();
        }
        Err(e) => warn!(channel = %channel.config.name, "render failed: {e}"),
    }
}

/// Copy the newest `capacity` samples of `old` into a new buffer.
fn reseed(old: &RollingSeriesBuffer, capacity: usize) -> Result<RollingSeriesBuffer> {
    let mut fresh = RollingSeriesBuffer::new(old.channel(), capacity)?;
    if !old.is_active() {
        fresh.close();
        return Ok(fresh);
    }
    let history = old.snapshot();
    let skip = history.len().saturating_sub(capacity);
    for sample in history.into_iter().skip(skip) {
        fresh.append(sample)?;
    }
    Ok(fresh)
}
