//! Logging configuration using tracing
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! `<data dir>/aws-dash/logs/`. The level is controlled by `AWS_DASH_LOG`:
//!
//! ```bash
//! AWS_DASH_LOG=debug aws-dash
//! ```

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "AWS_DASH_LOG";

pub fn init() -> std::io::Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "aws-dash.log");

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("aws_dash=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("aws-dash starting, logging to {}", log_dir.display());
    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aws-dash")
        .join("logs")
}
