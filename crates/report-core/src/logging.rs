//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "COURSE_REPORT_LOG";

const LOG_FILE_NAME: &str = "course-report.log";
const DEFAULT_FILTER: &str = "course_report=info,report_app=info,report_client=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/course-report/logs/` because the
/// terminal itself is owned by the TUI. Log level is controlled by the
/// `COURSE_REPORT_LOG` environment variable.
///
/// # Examples
/// ```bash
/// COURSE_REPORT_LOG=debug course-report --course-id 42 --course-name "Rust 101"
/// COURSE_REPORT_LOG=report_client=trace course-report --course-id 42 --course-name x
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

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

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Course Report Desk starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("course-report").join("logs"))
}
