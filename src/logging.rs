use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, Once};

use anyhow::Context;
use tracing::Level;

static INIT: Once = Once::new();

/// Parse a `log_level` config value such as `"info"` or `"DEBUG"`.
pub fn parse_level(level: &str) -> anyhow::Result<Level> {
    Level::from_str(level.trim()).map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        )
    })
}

/// Where the log file lives: `$XDG_STATE_HOME/moodboard/moodboard.log`,
/// falling back to the data directory on platforms without a state dir.
pub fn log_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .context("Could not determine a directory for the log file")?;
    Ok(dir.join("moodboard").join("moodboard.log"))
}

/// Send `tracing` output to `path`, appending.
///
/// The terminal belongs to the TUI, so nothing is logged to stdout or
/// stderr.  Only the first call installs a subscriber.
pub fn init(level: &str, path: &Path) -> anyhow::Result<()> {
    let level = parse_level(level)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        });
    }

    Ok(())
}

/// Install file logging for this run and report whether it is active.
///
/// The TUI needs its log file.  Headless commands print to the terminal, so
/// when the file cannot be set up they warn on stderr and carry on.
pub fn setup(level: &str, path: anyhow::Result<PathBuf>, headless: bool) -> anyhow::Result<bool> {
    match path.and_then(|path| init(level, &path)) {
        Ok(()) => Ok(true),
        Err(e) if headless => {
            eprintln!("warning: logging disabled: {e:#}");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
