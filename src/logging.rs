use std::path::Path;

use chrono::{DateTime, Local};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter::ParseError, fmt, EnvFilter, Registry};

/// Used when the configuration leaves `log-dir` unset.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Console output: dataset loading, bind address and request failures.
fn console_filter() -> Result<EnvFilter, ParseError> {
    Ok(EnvFilter::from_default_env().add_directive("info".parse()?))
}

/// Log file: everything the explorer emits down to per-request selections and
/// filter/aggregate counts, without dependency chatter.
fn file_filter() -> Result<EnvFilter, ParseError> {
    Ok(EnvFilter::from_default_env().add_directive("health_explorer=debug".parse()?))
}

/// One file per run, named after the start time so CLI runs and server
/// restarts never append to each other.
fn log_file_name(started: DateTime<Local>) -> String {
    format!("{}.log", started.format("%Y-%m-%d_%H-%M-%S"))
}

/**
Installs the global subscriber for the CLI and the dashboard server.

## Arguments
* `log_dir` - Directory for the run's log file, created if absent.

## Returns
The file writer's guard. Dropping it flushes and stops file logging, so the
caller keeps it until exit.
 */
pub fn setup_tracing(log_dir: Option<&str>) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let log_dir = Path::new(log_dir.unwrap_or(DEFAULT_LOG_DIR));
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file_name(Local::now()));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_level(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_filter(console_filter()?);

    // Concurrent dashboard requests interleave; the worker name tells them apart.
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_filter(file_filter()?);

    let subscriber = Registry::default().with(console_layer).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    info!(log_dir = %log_dir.display(), "Explorer logging started");

    Ok(guard)
}
