pub mod registry;
pub mod stream;

pub use registry::{MetricRegistry, DEFAULT_CAPACITY, DEFAULT_METRIC_NAMES};
pub use stream::{MetricStream, Sample};
