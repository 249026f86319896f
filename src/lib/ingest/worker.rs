use std::thread::JoinHandle;

use tracing::*;

use super::queue::IngestSender;
use crate::{
    error::{Error, Result},
    link::RawLineSource,
    shutdown::Shutdown,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReaderStats {
    pub pushed: usize,
    pub skipped: usize,
}

/// Reads the link on a dedicated thread and pushes every line into the ingest queue.
///
/// The reader never waits on the consumer, a slow renderer only makes the queue grow.
#[derive(Debug)]
pub struct ReaderWorker {
    handle: JoinHandle<ReaderStats>,
}

impl ReaderWorker {
    /// Opens the link on the calling thread, so a failure is reported before
    /// anything is spawned, then starts reading it.
    #[instrument(level = "debug", skip_all)]
    pub fn start<S, F>(open: F, sender: IngestSender, shutdown: Shutdown) -> Result<Self>
    where
        S: RawLineSource + 'static,
        F: FnOnce() -> Result<S>,
    {
        let source = open()?;
        Self::spawn(source, sender, shutdown)
    }

    #[instrument(level = "debug", skip_all, fields(link = %source.describe()))]
    pub fn spawn<S>(source: S, sender: IngestSender, shutdown: Shutdown) -> Result<Self>
    where
        S: RawLineSource + 'static,
    {
        let handle = std::thread::Builder::new()
            .name("LinkReader".into())
            .spawn(move || ReaderWorker::reader_loop(source, sender, shutdown))?;

        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the reader thread to leave its loop.
    pub fn join(self) -> Option<ReaderStats> {
        match self.handle.join() {
            Ok(stats) => Some(stats),
            Err(_) => {
                error!("Link reader thread panicked");
                None
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(link = %source.describe()))]
    fn reader_loop<S: RawLineSource>(
        mut source: S,
        sender: IngestSender,
        shutdown: Shutdown,
    ) -> ReaderStats {
        let mut stats = ReaderStats::default();
        // The first line may be a partial record that started before the link was opened
        let mut first_line_pending = true;

        while !shutdown.is_triggered() {
            let line = match source.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(Error::InvalidEncoding(error)) => {
                    if std::mem::take(&mut first_line_pending) {
                        debug!("Discarding first line: {error}");
                    } else {
                        warn!("Skipping line: {error}");
                        stats.skipped += 1;
                    }
                    continue;
                }
                Err(Error::LinkClosed) => {
                    info!("Link closed");
                    break;
                }
                Err(error) => {
                    error!("Failed reading from link: {error}");
                    break;
                }
            };

            if std::mem::take(&mut first_line_pending) {
                debug!("Discarding first line: {line:?}");
                continue;
            }

            trace!("Line received: {line:?}");

            if sender.push(line).is_err() {
                debug!("Ingest queue closed, stopping reader");
                break;
            }
            stats.pushed += 1;
        }

        debug!("Reader finished: {stats:?}");
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, time::Duration};

    use super::*;
    use crate::ingest::queue;

    /// Hands out scripted results, then reports the link as closed.
    struct ScriptedSource {
        script: VecDeque<Result<Option<String>>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Option<String>>>) -> Self {
            Self {
                script: script.into(),
            }
        }

        fn lines(lines: &[&str]) -> Self {
            Self::new(
                lines
                    .iter()
                    .map(|line| Ok(Some(line.to_string())))
                    .collect(),
            )
        }
    }

    impl RawLineSource for ScriptedSource {
        fn next_line(&mut self) -> Result<Option<String>> {
            self.script.pop_front().unwrap_or(Err(Error::LinkClosed))
        }

        fn describe(&self) -> String {
            "scripted".into()
        }
    }

    /// Never produces anything, like a silent serial port.
    struct SilentSource;

    impl RawLineSource for SilentSource {
        fn next_line(&mut self) -> Result<Option<String>> {
            std::thread::sleep(Duration::from_millis(1));
            Ok(None)
        }

        fn describe(&self) -> String {
            "silent".into()
        }
    }

    fn invalid_encoding() -> Error {
        Error::InvalidEncoding(String::from_utf8(vec![0xff]).unwrap_err())
    }

    #[test]
    fn discards_first_line_and_forwards_the_rest() {
        let (sender, mut queue) = queue::channel();
        let source = ScriptedSource::lines(&["2,30,0.5", "0,1000000,2,555", "0,2000000,3,1"]);

        let worker = ReaderWorker::spawn(source, sender, Shutdown::new()).unwrap();
        let stats = worker.join().unwrap();

        assert_eq!(
            stats,
            ReaderStats {
                pushed: 2,
                skipped: 0
            }
        );
        assert_eq!(queue.drain_all(), vec!["0,1000000,2,555", "0,2000000,3,1"]);
        assert!(queue.is_finished());
    }

    #[test]
    fn timeouts_and_bad_encoding_do_not_reach_the_queue() {
        let (sender, mut queue) = queue::channel();
        let source = ScriptedSource::new(vec![
            Ok(None),
            Err(invalid_encoding()),
            Ok(None),
            Ok(Some("0,1,0,1".into())),
            Err(invalid_encoding()),
            Ok(Some("0,2,0,2".into())),
        ]);

        let stats = ReaderWorker::spawn(source, sender, Shutdown::new())
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(
            stats,
            ReaderStats {
                pushed: 2,
                skipped: 1
            }
        );
        assert_eq!(queue.drain_all(), vec!["0,1,0,1", "0,2,0,2"]);
    }

    #[test]
    fn stops_on_hard_link_error() {
        let (sender, mut queue) = queue::channel();
        let source = ScriptedSource::new(vec![
            Ok(Some("first".into())),
            Ok(Some("0,1,0,1".into())),
            Err(Error::Io(std::io::Error::other("unplugged"))),
            Ok(Some("0,2,0,2".into())),
        ]);

        ReaderWorker::spawn(source, sender, Shutdown::new())
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(queue.drain_all(), vec!["0,1,0,1"]);
    }

    #[test]
    fn stops_when_consumer_is_gone() {
        let (sender, queue) = queue::channel();
        drop(queue);
        let source = ScriptedSource::lines(&["first", "0,1,0,1", "0,2,0,2"]);

        let stats = ReaderWorker::spawn(source, sender, Shutdown::new())
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(stats.pushed, 0);
    }

    #[test]
    fn shutdown_stops_a_silent_link() {
        let (sender, _queue) = queue::channel();
        let shutdown = Shutdown::new();

        let worker = ReaderWorker::spawn(SilentSource, sender, shutdown.clone()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        assert!(!worker.is_finished());

        shutdown.trigger();
        assert_eq!(worker.join(), Some(ReaderStats::default()));
    }

    #[test]
    fn open_failure_is_reported_to_the_caller() {
        let (sender, _queue) = queue::channel();

        let result = ReaderWorker::start(
            || -> Result<ScriptedSource> { Err(Error::LinkClosed) },
            sender,
            Shutdown::new(),
        );

        assert!(matches!(result, Err(Error::LinkClosed)));
    }
}
