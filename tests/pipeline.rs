use std::{
    io::Cursor,
    time::{Duration, Instant},
};

use sensor_stream_plotter::{
    error::Result,
    ingest::{self, IngestLoop, ReaderStats, ReaderWorker},
    link::ReplayLink,
    metrics::{MetricRegistry, Sample, DEFAULT_CAPACITY},
    render::{JsonRenderer, Renderer},
    shutdown::Shutdown,
};

#[derive(Default)]
struct CountingRenderer {
    redraws: usize,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, _registry: &MetricRegistry) -> Result<()> {
        self.redraws += 1;
        Ok(())
    }
}

const CAPTURE: &str = "00,555\n\
    0,1000000,2,555\n\
    1,2000000,0.1,0.2,0.3,0.4,0.5,0.6\r\n\
    2,3000000,10.0,20.0,0.5\n\
    3,4000000,boot ok, all sensors up\n\
    not a record\n\
    0,5000000,2,556";

/// Replays a capture through the whole pipeline and waits until it is fully ingested.
fn ingest_capture(capture: String, capacity: usize) -> anyhow::Result<(IngestLoop, ReaderStats)> {
    let (sender, queue) = ingest::channel();
    let shutdown = Shutdown::new();

    let worker = ReaderWorker::start(
        || Ok(ReplayLink::new("capture", Cursor::new(capture))),
        sender,
        shutdown.clone(),
    )?;

    let mut ingest = IngestLoop::new(queue, MetricRegistry::with_defaults(capacity)?);
    let mut renderer = CountingRenderer::default();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !(worker.is_finished() && ingest.run_once(&mut renderer) == 0) {
        anyhow::ensure!(Instant::now() < deadline, "Capture was not ingested in time");
        std::thread::sleep(Duration::from_millis(1));
    }
    anyhow::ensure!(renderer.redraws > 0, "Nothing was rendered");

    shutdown.trigger();
    let stats = worker
        .join()
        .ok_or_else(|| anyhow::anyhow!("Reader thread panicked"))?;

    Ok((ingest, stats))
}

#[test]
fn replayed_capture_reaches_the_metric_streams() -> anyhow::Result<()> {
    let (ingest, reader_stats) = ingest_capture(CAPTURE.to_string(), DEFAULT_CAPACITY)?;
    let registry = ingest.registry();

    assert_eq!(reader_stats.pushed, 6);

    assert_eq!(
        registry.get("EXT ADC 2").unwrap().snapshot(),
        vec![Sample::from((1.0, 555.0)), Sample::from((5.0, 556.0))]
    );
    assert_eq!(
        registry.get("ACCEL X").unwrap().snapshot(),
        vec![Sample::from((2.0, 0.1))]
    );
    assert_eq!(
        registry.get("GYRO Z").unwrap().snapshot(),
        vec![Sample::from((2.0, 0.6))]
    );
    assert_eq!(
        registry.get("ACTIVE THERM").unwrap().snapshot(),
        vec![Sample::from((3.0, 10.0))]
    );
    assert_eq!(
        registry.get("PASSIVE THERM").unwrap().snapshot(),
        vec![Sample::from((3.0, 20.0))]
    );
    assert_eq!(
        registry.get("FSR").unwrap().snapshot(),
        vec![Sample::from((3.0, 0.5))]
    );

    // The partial first record never reaches a stream
    assert!(registry.get("EXT ADC 0").unwrap().is_empty());

    let stats = ingest.stats();
    assert_eq!(stats.lines, 6);
    assert_eq!(stats.events, 5);
    assert_eq!(stats.dropped, 1);

    Ok(())
}

#[test]
fn windows_keep_only_the_latest_samples() -> anyhow::Result<()> {
    let capture = std::iter::once("partial".to_string())
        .chain((0..20).map(|index| format!("0,{},3,{index}", index * 1_000_000)))
        .collect::<Vec<String>>()
        .join("\n");

    let (ingest, reader_stats) = ingest_capture(capture, 5)?;
    assert_eq!(reader_stats.pushed, 20);
    assert_eq!(ingest.stats().events, 20);
    assert_eq!(ingest.stats().unknown_metric_writes, 0);

    let expected = (15..20)
        .map(|index| Sample::from((index as f64, index as f64)))
        .collect::<Vec<Sample>>();
    assert_eq!(
        ingest.registry().get("EXT ADC 3").unwrap().snapshot(),
        expected
    );
    assert_eq!(ingest.registry().get("EXT ADC 3").unwrap().capacity(), 5);

    Ok(())
}

#[test]
fn json_frames_follow_registry_order() -> anyhow::Result<()> {
    let (ingest, _) = ingest_capture(CAPTURE.to_string(), DEFAULT_CAPACITY)?;

    let mut renderer = JsonRenderer::new(vec![], Duration::ZERO);
    renderer.render(ingest.registry())?;
    let output = String::from_utf8(renderer.into_inner())?;

    let frame: serde_json::Value = serde_json::from_str(output.trim_end())?;
    let names = frame["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|metric| metric["name"].as_str().unwrap())
        .collect::<Vec<&str>>();
    assert_eq!(names, ingest.registry().names());
    assert_eq!(frame["metrics"][12]["name"], "FSR");
    assert_eq!(frame["metrics"][12]["samples"][0]["value"], 0.5);

    Ok(())
}
