use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::error::Result;

/// Installs the process-wide subscriber: stderr output filtered by
/// `RUST_LOG` (warnings and errors by default), plus warnings and errors
/// appended to `<log_dir>/<log_file>`.
///
/// Keep the returned guard alive until exit, dropping it flushes the file.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::WARN);

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_filter(
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
    );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
