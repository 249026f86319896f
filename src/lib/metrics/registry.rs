use tracing::*;

use super::stream::MetricStream;
use crate::error::{Error, Result};

pub const DEFAULT_CAPACITY: usize = 1000;

pub const DEFAULT_METRIC_NAMES: [&str; 13] = [
    "EXT ADC 0",
    "EXT ADC 1",
    "EXT ADC 2",
    "EXT ADC 3",
    "ACCEL X",
    "ACCEL Y",
    "ACCEL Z",
    "GYRO X",
    "GYRO Y",
    "GYRO Z",
    "ACTIVE THERM",
    "PASSIVE THERM",
    "FSR",
];

pub fn default_metric_names() -> Vec<String> {
    DEFAULT_METRIC_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// All metric streams known to the pipeline, kept in the order they were provisioned.
///
/// Renderers address streams by position, so the order is fixed at construction
/// and never changes afterwards.
#[derive(Debug)]
pub struct MetricRegistry {
    streams: Vec<MetricStream>,
}

impl MetricRegistry {
    #[instrument(level = "debug", skip(names))]
    pub fn new<I, S>(capacity: usize, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut streams: Vec<MetricStream> = vec![];

        for name in names {
            let name = name.into();
            if streams.iter().any(|stream| stream.name() == name) {
                return Err(Error::DuplicateMetric(name));
            }
            streams.push(MetricStream::new(name, capacity)?);
        }

        debug!("Provisioned {} metric streams", streams.len());

        Ok(Self { streams })
    }

    pub fn with_defaults(capacity: usize) -> Result<Self> {
        Self::new(capacity, DEFAULT_METRIC_NAMES)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.streams.iter().position(|stream| stream.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&MetricStream> {
        self.streams.iter().find(|stream| stream.name() == name)
    }

    pub fn write(&mut self, name: &str, timestamp: f64, value: f64) -> Result<()> {
        let Some(stream) = self.streams.iter_mut().find(|stream| stream.name() == name) else {
            return Err(Error::UnknownMetric(name.to_string()));
        };

        stream.write(timestamp, value);
        Ok(())
    }

    /// Streams in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricStream> {
        self.streams.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.streams.iter().map(|stream| stream.name()).collect()
    }
}

impl<'a> IntoIterator for &'a MetricRegistry {
    type Item = &'a MetricStream;
    type IntoIter = std::slice::Iter<'a, MetricStream>;

    fn into_iter(self) -> Self::IntoIter {
        self.streams.iter()
    }
}
