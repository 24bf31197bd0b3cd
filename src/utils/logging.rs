//! Diagnostic logging.
//!
//! The terminal UI owns stdout and stderr, so tracing output only goes to a
//! file named with `--log`. Without one no subscriber is installed.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Opens `path` for appending, creating it if needed, and checks that it is
/// writable.
pub fn open_log_file(path: &Path) -> Result<File, Box<dyn std::error::Error>> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.flush()?;
    Ok(file)
}

/// Filter from `RUST_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a global subscriber writing plain-text events to `path`.
pub fn init_file_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| -> Box<dyn std::error::Error> { err })?;
    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
