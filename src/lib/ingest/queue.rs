use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::error::{Error, Result};

pub type RawLine = String;

/// Creates the unbounded hand-off between the link reader and the ingest loop.
///
/// Memory grows instead of dropping lines when the consumer falls behind.
pub fn channel() -> (IngestSender, IngestQueue) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (IngestSender { sender }, IngestQueue { receiver })
}

/// Producer half, owned by the reader thread.
#[derive(Debug, Clone)]
pub struct IngestSender {
    sender: UnboundedSender<RawLine>,
}

impl IngestSender {
    /// Never blocks, fails only once the consumer half is gone.
    pub fn push(&self, line: RawLine) -> Result<()> {
        self.sender.send(line).map_err(|_| Error::QueueClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer half, owned by the ingest loop.
#[derive(Debug)]
pub struct IngestQueue {
    receiver: UnboundedReceiver<RawLine>,
}

impl IngestQueue {
    /// Takes every line queued so far, in push order, without waiting for more.
    pub fn drain_all(&mut self) -> Vec<RawLine> {
        let mut lines = vec![];
        loop {
            match self.receiver.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        lines
    }

    /// True once every producer is gone and nothing is left to drain.
    pub fn is_finished(&self) -> bool {
        self.receiver.is_closed() && self.receiver.is_empty()
    }
}
