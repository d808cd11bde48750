//! Logging setup.
//!
//! Records go to stderr and to a size-rotated log file. The file layer is
//! fed through a non-blocking writer so a slow disk never stalls a cycle.

pub mod log_rotation;

use crate::config::LogConfig;
use crate::error::{BotError, Result};
use log_rotation::RotatingFileWriter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over [`LogConfig::filter`]. The returned
/// guard must stay alive for the process lifetime or buffered file records
/// are lost.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let writer = RotatingFileWriter::open(&config.path, config.max_bytes, config.backups)?;
    let (file_writer, guard) = tracing_appender::non_blocking(writer);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| BotError::Config(format!("cannot install log subscriber: {e}")))?;

    tracing::debug!(path = %config.path.display(), "logging initialised");
    Ok(guard)
}
