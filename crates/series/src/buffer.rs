use board_core::{BoardError, Result, Sample};
use std::collections::VecDeque;
use tracing::debug;

/// Outcome of a successful [`RollingSeriesBuffer::append`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Append {
    /// Sample stored.  Carries the oldest sample if it was evicted to make room.
    Stored(Option<Sample>),
    /// The buffer was closed; the sample was discarded.
    Ignored,
}

/// Fixed-capacity, time-ordered window of samples for one channel.
///
/// Samples are kept in non-decreasing timestamp order and the oldest one is
/// evicted once `capacity` is exceeded, so a live chart always shows the most
/// recent `capacity` points and memory stays bounded.
#[derive(Debug, Clone)]
pub struct RollingSeriesBuffer {
    channel:  String,
    samples:  VecDeque<Sample>,
    capacity: usize,
    dirty:    bool,
    active:   bool,
}

impl RollingSeriesBuffer {
    /// Create an empty buffer.  `capacity` must be at least 1.
    pub fn new(channel: impl Into<String>, capacity: usize) -> Result<Self> {
        let channel = channel.into();
        if capacity == 0 {
            return Err(BoardError::Config(format!(
                "channel '{channel}': capacity must be at least 1"
            )));
        }
        Ok(Self {
            channel,
            samples: VecDeque::with_capacity(capacity),
            capacity,
            dirty: false,
            active: true,
        })
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Push `sample` at the tail, evicting the oldest sample if at capacity.
    ///
    /// A timestamp older than the last stored one fails with
    /// [`BoardError::OutOfOrderSample`] and leaves the buffer untouched.
    pub fn append(&mut self, sample: Sample) -> Result<Append> {
        if !self.active {
            return Ok(Append::Ignored);
        }

        if let Some(last) = self.samples.back() {
            if sample.timestamp() < last.timestamp() {
                return Err(BoardError::OutOfOrderSample {
                    channel: self.channel.clone(),
                    last:    last.timestamp(),
                    got:     sample.timestamp(),
                });
            }
        }

        self.samples.push_back(sample);
        let evicted = if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.dirty = true;

        debug!(
            channel = %self.channel,
            timestamp = sample.timestamp(),
            value = sample.value(),
            evicted = evicted.is_some(),
            "sample appended"
        );
        Ok(Append::Stored(evicted))
    }

    /// Validate a raw `(timestamp, value)` pair and append it.
    pub fn append_raw(&mut self, timestamp: i64, value: f64) -> Result<Append> {
        self.append(Sample::new(timestamp, value)?)
    }

    /// Ordered copy of the current window, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Samples with `start <= timestamp <= end`; an absent `end` is open.
    #[must_use]
    pub fn range(&self, start: i64, end: Option<i64>) -> Vec<Sample> {
        let end = end.unwrap_or(i64::MAX);
        // Ordered by timestamp, so the window is contiguous.
        let from = self.samples.partition_point(|s| s.timestamp() < start);
        self.samples
            .range(from..)
            .take_while(|s| s.timestamp() <= end)
            .copied()
            .collect()
    }

    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `true` if a sample was appended since the last successful render.
    /// The dashboard retries dirty channels until the sink accepts them.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Mark the buffer inactive.  Later appends become no-ops.
    pub fn close(&mut self) {
        self.active = false;
        self.dirty = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
