use tracing::{metadata::LevelFilter, *};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer};

use crate::cli;

// Start logger, should be done inside main
pub fn init() {
    // Redirect all logs from libs using "Log"
    LogTracer::init_with_filter(tracing::log::LevelFilter::Trace).expect("Failed to set logger");

    // Configure the console log
    let console_env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli::manager::is_verbose() {
            EnvFilter::new(LevelFilter::DEBUG.to_string())
        } else {
            EnvFilter::new(LevelFilter::INFO.to_string())
        }
    });

    let console_layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(fmt::format::FmtSpan::NONE)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_filter(filter_unwanted_crates(console_env_filter));

    // Configure the file log
    let file_layer = cli::manager::log_path().map(|dir| {
        let file_env_filter = if cli::manager::is_verbose() {
            EnvFilter::new(LevelFilter::TRACE.to_string())
        } else {
            EnvFilter::new(LevelFilter::DEBUG.to_string())
        };
        let file_appender =
            tracing_appender::rolling::hourly(dir, concat!(env!("CARGO_PKG_NAME"), ".log"));
        fmt::Layer::new()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::NONE)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_filter(filter_unwanted_crates(file_env_filter))
    });

    // Configure the default subscriber
    let subscriber = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).expect("Unable to set a global subscriber");

    info!(
        "{}, version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );
    info!(
        "Starting at {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
    );
    debug!("Command line call: {}", cli::manager::command_line_string());
    debug!("Command line input struct call: {:#?}", cli::manager::args());
}

fn filter_unwanted_crates(env_filter: EnvFilter) -> EnvFilter {
    env_filter
        // Device enumeration on the serial port is pretty verbose when it's on
        .add_directive("serialport=info".parse().unwrap())
        .add_directive("mio=off".parse().unwrap())
}
