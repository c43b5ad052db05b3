//! File logging. The terminal is busy with the animation, so logs never go
//! to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use fall_leaves_config::{LogConfig, project_dirs};
use tracing_subscriber::EnvFilter;

/// Log file name inside the local data directory.
const LOG_FILE: &str = "fall-leaves.log";

/// Install the global subscriber if logging is enabled.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let Some(dirs) = project_dirs() else {
        return Ok(());
    };

    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!(err))?;

    tracing::info!(path = %dir.join(LOG_FILE).display(), "logging started");
    Ok(())
}
