//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `<data dir>/hearth/logs/`.
/// Log level is controlled by the `HEARTH_LOG` environment variable, falling
/// back to `default_filter` (normally `ShellConfig::log_filter`).
///
/// # Examples
/// ```bash
/// HEARTH_LOG=debug my-shell
/// HEARTH_LOG=hearth_shell=trace my-shell
/// ```
pub fn init(default_filter: &str) -> Result<()> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "hearth.log");

    let env_filter = EnvFilter::try_from_env("HEARTH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("hearth starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("hearth").join("logs"))
}

/// Get the log file path for the current day
pub fn current_log_file() -> Result<PathBuf> {
    let dir = log_directory()?;
    Ok(dir.join("hearth.log"))
}
