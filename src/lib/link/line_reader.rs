use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::error::{Error, Result};

/// Splits a byte stream into newline terminated text lines.
///
/// Bytes received before a read timeout are kept and completed by the following
/// reads, so a slow link never produces torn lines.
pub struct LineReader<R> {
    reader: BufReader<R>,
    pending: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pending: vec![],
        }
    }

    /// Returns the next complete line, without its terminator.
    ///
    /// `Ok(None)` means the link had nothing more to say before the read timed out.
    /// Once the underlying stream ends, any unterminated trailing bytes are returned
    /// as a last line and every later call fails with [`Error::LinkClosed`].
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Err(Error::LinkClosed),
            Ok(0) => self.take_pending().map(Some),
            Ok(_) if self.pending.ends_with(b"\n") => self.take_pending().map(Some),
            // End of stream reached in the middle of a line, flushed by the next call
            Ok(_) => Ok(None),
            Err(error) if is_transient(error.kind()) => Ok(None),
            Err(error) => Err(Error::Io(error)),
        }
    }

    fn take_pending(&mut self) -> Result<String> {
        let mut line = String::from_utf8(std::mem::take(&mut self.pending))?;
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}

fn is_transient(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::TimedOut | ErrorKind::WouldBlock)
}
