//! Opt-in logging.
//!
//! The terminal UI owns stdout, so logs only ever go to a file, and only
//! when one is asked for (see `config::LOG_FILE_ENV`). The level comes from
//! `RUST_LOG` and defaults to info.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the log writer alive; dropping it flushes the file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Start logging to `log_file`, truncating whatever a previous run left
/// there. With no file there is no subscriber and every log call is a no-op.
pub fn init_logging(log_file: Option<&Path>) -> Result<Option<LoggingGuard>, io::Error> {
    let path = match log_file {
        Some(p) => p,
        None => return Ok(None),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path {} has no file name", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir)?;
    fs::write(path, "")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(Some(LoggingGuard {
        _file_guard: file_guard,
    }))
}
