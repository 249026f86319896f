use std::{io::Write, time::Duration};

use serde::Serialize;

use super::{Renderer, Throttle};
use crate::{
    error::{Error, Result},
    metrics::{MetricRegistry, Sample},
};

#[derive(Serialize)]
struct Frame<'a> {
    metrics: Vec<MetricFrame<'a>>,
}

#[derive(Serialize)]
struct MetricFrame<'a> {
    name: &'a str,
    samples: Vec<Sample>,
}

/// Writes each redraw as one JSON document per line, for external plotting tools.
pub struct JsonRenderer<W> {
    writer: W,
    throttle: Throttle,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W, interval: Duration) -> Self {
        Self {
            writer,
            throttle: Throttle::new(interval),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, registry: &MetricRegistry) -> Result<()> {
        if !self.throttle.ready() {
            return Ok(());
        }

        let frame = Frame {
            metrics: registry
                .iter()
                .map(|stream| MetricFrame {
                    name: stream.name(),
                    samples: stream.snapshot(),
                })
                .collect(),
        };

        serde_json::to_writer(&mut self.writer, &frame)
            .map_err(|error| Error::Render(error.to_string()))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        Ok(())
    }
}
