use std::{path::PathBuf, sync::Arc};

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Periodic per-metric summary in the log
    Log,
    /// One JSON document per redraw on stdout
    Json,
}

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Args {
    /// Serial device of the sensor board, e.g. /dev/ttyACM0.
    #[arg(env = "SENSOR_PORT", required_unless_present = "replay")]
    pub port: Option<String>,

    /// Replays a captured serial log instead of opening a device.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Serial baud rate, overrides the settings file.
    #[arg(long, value_name = "BAUDS")]
    pub baud_rate: Option<u32>,

    /// Number of samples kept per metric, overrides the settings file.
    #[arg(long, value_name = "SAMPLES")]
    pub capacity: Option<usize>,

    /// JSON settings file with capacity, baud rate and metric names.
    #[arg(long, value_name = "FILE", env = "SENSOR_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// How the metric windows are rendered.
    #[arg(long, value_enum, default_value_t = RenderMode::Log)]
    pub render: RenderMode,

    /// Minimum time between two redraws, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 200)]
    pub render_interval_ms: u64,

    /// Sleep between two polls of an empty queue, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1)]
    pub idle_ms: u64,

    /// Turns all log categories up to Debug, for more information check RUST_LOG env variable.
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write Debug (or Trace, when verbose) logs to hourly files in this folder.
    #[arg(long, value_name = "DIR")]
    pub log_path: Option<PathBuf>,
}

#[derive(Debug)]
struct Manager {
    clap_matches: Args,
}

lazy_static! {
    static ref MANAGER: Arc<Manager> = Arc::new(Manager::new());
}

impl Manager {
    fn new() -> Self {
        Self {
            clap_matches: Args::parse(),
        }
    }
}

// Construct our manager, should be done inside main
pub fn init() {
    MANAGER.as_ref();
}

pub fn args() -> &'static Args {
    &MANAGER.as_ref().clap_matches
}

// Check if the verbosity parameter was used
pub fn is_verbose() -> bool {
    MANAGER.as_ref().clap_matches.verbose
}

pub fn log_path() -> Option<PathBuf> {
    MANAGER.as_ref().clap_matches.log_path.clone()
}

// Return the command line used to start this application
pub fn command_line_string() -> String {
    std::env::args().collect::<Vec<String>>().join(" ")
}
