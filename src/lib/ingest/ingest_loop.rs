use std::time::Duration;

use tracing::*;

use super::{queue::IngestQueue, routing::Router};
use crate::{
    metrics::MetricRegistry,
    protocol::{decode, DecodeError},
    render::Renderer,
    shutdown::Shutdown,
};

/// Back-off used when the queue is found empty.
pub const DEFAULT_IDLE: Duration = Duration::from_millis(1);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub batches: usize,
    pub lines: usize,
    pub events: usize,
    pub dropped: usize,
    pub unknown_metric_writes: usize,
}

/// Consumer side of the pipeline: drains the queue, decodes, stores and redraws.
///
/// It runs on the thread that owns the renderer, so it polls the queue instead of
/// blocking on it.
#[derive(Debug)]
pub struct IngestLoop {
    queue: IngestQueue,
    registry: MetricRegistry,
    router: Router,
    stats: IngestStats,
    idle: Duration,
}

impl IngestLoop {
    pub fn new(queue: IngestQueue, registry: MetricRegistry) -> Self {
        Self {
            queue,
            registry,
            router: Router::new(),
            stats: IngestStats::default(),
            idle: DEFAULT_IDLE,
        }
    }

    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = idle;
        self
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Decodes a single line and stores its samples, bad lines are dropped.
    pub fn process_line(&mut self, line: &str) {
        self.stats.lines += 1;

        let event = match decode(line) {
            Ok(event) => event,
            Err(error) => {
                self.stats.dropped += 1;
                match error {
                    DecodeError::ArityMismatch { .. } => {
                        debug!("Dropping line {line:?}: {error}")
                    }
                    DecodeError::MalformedLine(_)
                    | DecodeError::InvalidNumber { .. }
                    | DecodeError::UnknownKind(_) => {
                        trace!("Dropping line {line:?}: {error}")
                    }
                }
                return;
            }
        };

        self.stats.events += 1;
        let outcome = self.router.route(&event, &mut self.registry);
        self.stats.unknown_metric_writes += outcome.unknown;
    }

    /// Processes everything currently queued and redraws once if anything arrived.
    ///
    /// Returns the number of lines taken from the queue.
    pub fn run_once<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let lines = self.queue.drain_all();
        if lines.is_empty() {
            return 0;
        }

        debug!("Read {} lines from queue", lines.len());
        self.stats.batches += 1;

        for line in &lines {
            self.process_line(line);
        }

        if let Err(error) = renderer.render(&self.registry) {
            error!("Failed to render metrics: {error}");
        }

        lines.len()
    }

    #[instrument(level = "debug", skip_all)]
    pub fn run<R: Renderer + ?Sized>(&mut self, renderer: &mut R, shutdown: &Shutdown) {
        info!("Ingesting {} metrics", self.registry.len());

        while !shutdown.is_triggered() {
            if self.run_once(renderer) == 0 {
                std::thread::sleep(self.idle);
            }
        }

        info!("Ingest loop stopped: {:?}", self.stats);
    }
}
