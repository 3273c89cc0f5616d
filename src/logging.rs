//! File-backed logger for the terminal app.
//!
//! The game owns the alternate screen, so log records go to a file instead of
//! stderr. `RUST_LOG` controls filtering as usual.

use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

const DEFAULT_FILTER: &str = "warn";

/// Install the global logger, appending to `path`.
///
/// Calling this twice leaves the first logger in place.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    Ok(())
}
