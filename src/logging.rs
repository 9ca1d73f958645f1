//! Operator-facing diagnostics.
//!
//! The terminal belongs to the TUI, so tracing output goes to a log file in
//! the data directory instead of stderr. Filtering follows `RUST_LOG`,
//! defaulting to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Log file name within the data directory.
const LOG_FILE: &str = "dimlog.log";

/// Installs the global tracing subscriber, appending to `dir/dimlog.log`.
pub fn init(dir: &Path) -> Result<(), io::Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
