#[macro_use]
extern crate lazy_static;
extern crate tracing;

pub mod cli;
pub mod error;
pub mod ingest;
pub mod link;
pub mod logger;
pub mod metrics;
pub mod protocol;
pub mod render;
pub mod settings;
pub mod shutdown;
