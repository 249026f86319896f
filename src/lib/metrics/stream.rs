use ringbuffer::{AllocRingBuffer, RingBuffer};
use serde::Serialize;

use crate::error::{Error, Result};

/// One point of a metric history: seconds since device boot and the measured value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

impl From<(f64, f64)> for Sample {
    fn from((timestamp, value): (f64, f64)) -> Self {
        Self { timestamp, value }
    }
}

/// Sliding window over the most recent samples of a single metric.
///
/// Once `capacity` samples are held, every write evicts the oldest one, so the
/// buffer always reflects the latest `capacity` writes in the order they happened.
pub struct MetricStream {
    name: String,
    buffer: AllocRingBuffer<Sample>,
}

impl std::fmt::Debug for MetricStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricStream")
            .field("name", &self.name)
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}

impl MetricStream {
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            name: name.into(),
            buffer: AllocRingBuffer::new(capacity),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write(&mut self, timestamp: f64, value: f64) {
        // AllocRingBuffer overwrites the oldest element when full
        self.buffer.push(Sample { timestamp, value });
    }

    /// Ordered copy of the current window, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.buffer.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.buffer.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.buffer.back()
    }

    /// Smallest and largest value in the window, `None` while empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.buffer.iter().fold(None, |range, sample| match range {
            None => Some((sample.value, sample.value)),
            Some((min, max)) => Some((min.min(sample.value), max.max(sample.value))),
        })
    }
}
