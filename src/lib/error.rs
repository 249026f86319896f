pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open link {path:?}: {source}")]
    LinkOpen {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Link closed")]
    LinkClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Received line is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("Ingest queue consumer is gone")]
    QueueClosed,

    #[error("Metric {0:?} is not provisioned")]
    UnknownMetric(String),

    #[error("Metric {0:?} was provisioned more than once")]
    DuplicateMetric(String),

    #[error("Invalid stream capacity: {0}, it must be at least 1")]
    InvalidCapacity(usize),

    #[error("Failed to load settings from {path:?}: {reason}")]
    Settings { path: String, reason: String },

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Render failed: {0}")]
    Render(String),
}
