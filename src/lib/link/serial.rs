use std::time::Duration;

use serialport::SerialPort;
use tracing::*;

use super::{line_reader::LineReader, RawLineSource};
use crate::error::{Error, Result};

pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// How long a single read may block, this bounds how fast the reader notices a shutdown.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

pub struct SerialLink {
    path: String,
    baud_rate: u32,
    reader: LineReader<Box<dyn SerialPort>>,
}

impl SerialLink {
    #[instrument(level = "debug")]
    pub fn open(path: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self> {
        info!("Opening serial port {path:?} at {baud_rate} bauds");

        let port = serialport::new(path, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|source| Error::LinkOpen {
                path: path.to_string(),
                source,
            })?;

        Ok(Self {
            path: path.to_string(),
            baud_rate,
            reader: LineReader::new(port),
        })
    }
}

impl RawLineSource for SerialLink {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.reader.read_line()
    }

    fn describe(&self) -> String {
        format!("serial:{}@{}", self.path, self.baud_rate)
    }
}
