pub mod line_reader;
pub mod replay;
pub mod serial;

pub use replay::ReplayLink;
pub use serial::{SerialLink, DEFAULT_BAUD_RATE};

use crate::error::Result;

/// A byte link that produces newline delimited text lines.
pub trait RawLineSource: Send {
    /// Reads the next line, without its terminator.
    ///
    /// `Ok(None)` means no complete line arrived within the read timeout.
    /// [`crate::error::Error::LinkClosed`] ends the sequence.
    fn next_line(&mut self) -> Result<Option<String>>;

    /// Human readable identification of the link, used in logs.
    fn describe(&self) -> String;
}

impl<T: RawLineSource + ?Sized> RawLineSource for Box<T> {
    fn next_line(&mut self) -> Result<Option<String>> {
        (**self).next_line()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
