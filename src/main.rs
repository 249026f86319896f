use std::time::Duration;

use anyhow::Context;
use tracing::*;

use sensor_stream_plotter::{
    cli::{self, manager::RenderMode},
    ingest::{self, IngestLoop, ReaderWorker},
    link::{serial::DEFAULT_READ_TIMEOUT, RawLineSource, ReplayLink, SerialLink},
    logger,
    metrics::MetricRegistry,
    render::{JsonRenderer, LogRenderer, Renderer},
    settings,
    shutdown::Shutdown,
};

fn open_link(baud_rate: u32) -> sensor_stream_plotter::error::Result<Box<dyn RawLineSource>> {
    let args = cli::manager::args();

    if let Some(replay) = &args.replay {
        return Ok(Box::new(ReplayLink::open(replay)?));
    }

    // Clap guarantees a port when there is nothing to replay
    let port = args.port.as_deref().unwrap_or_default();
    Ok(Box::new(SerialLink::open(port, baud_rate, DEFAULT_READ_TIMEOUT)?))
}

fn let_there_be_light() -> anyhow::Result<()> {
    let args = cli::manager::args();

    let settings = settings::manager::load(args.settings.as_deref())?
        .with_overrides(args.baud_rate, args.capacity);

    let shutdown = Shutdown::new();
    shutdown.install_interrupt_handler()?;

    let (sender, queue) = ingest::channel();
    let worker = ReaderWorker::start(|| open_link(settings.baud_rate), sender, shutdown.clone())
        .context("Unable to start the link reader")?;

    let registry = MetricRegistry::new(settings.capacity, &settings.metric_names)?;

    let interval = Duration::from_millis(args.render_interval_ms);
    let mut renderer: Box<dyn Renderer> = match args.render {
        RenderMode::Log => Box::new(LogRenderer::new(interval)),
        RenderMode::Json => Box::new(JsonRenderer::new(std::io::stdout(), interval)),
    };

    let mut ingest =
        IngestLoop::new(queue, registry).with_idle(Duration::from_millis(args.idle_ms));
    ingest.run(&mut renderer, &shutdown);

    shutdown.trigger();
    if let Some(stats) = worker.join() {
        info!("Link reader stopped: {stats:?}");
    }

    Ok(())
}

fn main() {
    // CLI should be started before logger to allow control over verbosity
    cli::manager::init();
    // Logger should start before everything else to register any log information
    logger::manager::init();

    if let Err(error) = let_there_be_light() {
        error!("{error:#}");
        std::process::exit(1);
    }
}
