use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Route tracing output to `path`, since the terminal belongs to the UI.
///
/// Returns the writer guard, which must live until exit so buffered lines
/// are flushed. With no path, or if the log file cannot be opened, logging
/// stays disabled.
pub fn init(path: Option<&Path>) -> Option<WorkerGuard> {
    let path = path?;
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let prefix = path.file_name()?.to_string_lossy().into_owned();

    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(prefix)
        .build(dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "abstractor starting");
    Some(guard)
}
