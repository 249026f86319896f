//! The ingestion pipeline.
//!
//! ```text
//! link -> ReaderWorker (LinkReader thread) -> IngestQueue -> IngestLoop -> MetricRegistry -> Renderer
//! ```
//!
//! The reader thread is the only place that blocks on the link. Everything after
//! the queue runs on the caller's thread, next to the renderer.

pub mod ingest_loop;
pub mod queue;
pub mod routing;
pub mod worker;

pub use ingest_loop::{IngestLoop, IngestStats, DEFAULT_IDLE};
pub use queue::{channel, IngestQueue, IngestSender, RawLine};
pub use routing::Router;
pub use worker::{ReaderStats, ReaderWorker};
