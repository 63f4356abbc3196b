//! Logger setup.
//!
//! The interactive game owns the terminal, so it only logs when a file is
//! configured. The simulator writes JSON to stdout and logs to stderr.

use std::fs::File;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};

use crate::config::AppConfig;

/// Install a file logger if `WHACK_LOG_PATH` is set. Returns whether one was installed.
pub fn init_file(config: &AppConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {}", path))?;
    Builder::new()
        .parse_filters(&config.log_filter)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already installed")?;
    Ok(true)
}

/// Install a stderr logger.
pub fn init_stderr(config: &AppConfig) -> Result<()> {
    Builder::new()
        .parse_filters(&config.log_filter)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init()
        .context("logger already installed")
}
