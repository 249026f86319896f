use std::time::Duration;

use tracing::*;

use super::{Renderer, Throttle};
use crate::{error::Result, metrics::MetricRegistry};

/// Summarizes every metric window in the log, one line per metric.
#[derive(Debug)]
pub struct LogRenderer {
    throttle: Throttle,
}

impl LogRenderer {
    pub fn new(interval: Duration) -> Self {
        Self {
            throttle: Throttle::new(interval),
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, registry: &MetricRegistry) -> Result<()> {
        if !self.throttle.ready() {
            return Ok(());
        }

        for (index, stream) in registry.iter().enumerate() {
            let (Some(latest), Some((min, max))) = (stream.latest(), stream.value_range()) else {
                // Nothing received yet for this metric
                debug!("[{index:2}] {}: no samples", stream.name());
                continue;
            };

            info!(
                "[{index:2}] {}: {}/{} samples, last {:.4} @ {:.3}s, range [{min:.4}, {max:.4}]",
                stream.name(),
                stream.len(),
                stream.capacity(),
                latest.value,
                latest.timestamp,
            );
        }

        Ok(())
    }
}
