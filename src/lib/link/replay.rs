use std::{fs::File, io::Read, path::Path};

use tracing::*;

use super::{line_reader::LineReader, RawLineSource};
use crate::error::Result;

/// Plays back a capture of the serial output, line by line, then closes.
pub struct ReplayLink<R> {
    name: String,
    reader: LineReader<R>,
}

impl ReplayLink<File> {
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Replaying capture {path:?}");

        let file = File::open(path)?;
        Ok(Self::new(path.display().to_string(), file))
    }
}

impl<R: Read> ReplayLink<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        Self {
            name: name.into(),
            reader: LineReader::new(inner),
        }
    }
}

impl<R: Read + Send> RawLineSource for ReplayLink<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.reader.read_line()
    }

    fn describe(&self) -> String {
        format!("replay:{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::Error;

    #[test]
    fn replays_every_line_then_closes() {
        let capture = "1,0,0.1\n0,1000000,2,555\n2,3000000,10.0,20.0,0.5";
        let mut link = ReplayLink::new("capture", Cursor::new(capture));

        let mut lines = vec![];
        loop {
            match link.next_line() {
                Ok(Some(line)) => lines.push(line),
                Ok(None) => continue,
                Err(Error::LinkClosed) => break,
                Err(error) => panic!("Unexpected error: {error}"),
            }
        }

        assert_eq!(
            lines,
            vec!["1,0,0.1", "0,1000000,2,555", "2,3000000,10.0,20.0,0.5"]
        );
        assert_eq!(link.describe(), "replay:capture");
    }

    #[test]
    fn missing_capture_is_an_io_error() {
        assert!(matches!(
            ReplayLink::open("/definitely/not/here.log"),
            Err(Error::Io(_))
        ));
    }
}
