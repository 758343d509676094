//! Log subscriber setup.
//!
//! Events go to stdout and, during a blend session, are appended without
//! colour to `<project>/log.txt`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{BlendError, Result};

/// Session log file name inside a project.
pub const LOG_FILENAME: &str = "log.txt";

/// Default filter for a `-v` count.
///
/// Regular progress is `info`; parsed config values and plan matrices are
/// `debug`; per-block detail is `trace`.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Path of the session log for a project.
pub fn log_path(project: &Path) -> PathBuf {
    project.join(LOG_FILENAME)
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. When `log_file` is given the
/// file is created if missing and appended to.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(open_log(path)?)),
        ),
        None => None,
    };

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout);

    // A second init (tests, repeated runs in one process) keeps the first.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BlendError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to open log file: {}", e),
        })
}
