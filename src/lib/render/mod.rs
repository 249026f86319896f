pub mod json_renderer;
pub mod log_renderer;

use std::time::{Duration, Instant};

pub use json_renderer::JsonRenderer;
pub use log_renderer::LogRenderer;

use crate::{error::Result, metrics::MetricRegistry};

pub const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(200);

/// Something that draws the metric histories, called once after every ingested batch.
///
/// Streams must be drawn in registry order, it is the only stable way to address them.
pub trait Renderer {
    fn render(&mut self, registry: &MetricRegistry) -> Result<()>;
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn render(&mut self, registry: &MetricRegistry) -> Result<()> {
        (**self).render(registry)
    }
}

/// Limits how often a renderer actually redraws.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when a redraw is due, and records it as done.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_never_throttles() {
        let mut throttle = Throttle::new(Duration::ZERO);

        assert!(throttle.ready());
        assert!(throttle.ready());
    }

    #[test]
    fn first_redraw_is_immediate_then_throttled() {
        let mut throttle = Throttle::new(Duration::from_secs(3600));

        assert!(throttle.ready());
        assert!(!throttle.ready());
    }
}
