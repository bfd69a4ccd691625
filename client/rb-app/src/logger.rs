//! Logger for the `rb` binary.
//!
//! Command results own stdout, so log lines go to stderr or to a file.

use crate::error::{AppError, Result as AppErrorResult};

use rb_config::LogLevel;

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::debug;

/// Install the global logger.
///
/// # Arguments
/// * `level` - Most verbose level that is emitted
/// * `log_file` - Append to this file instead of stderr
/// * `colored` - Color level names on stderr; ignored for files
pub fn initialize(level: LogLevel, log_file: Option<&Path>, colored: bool) -> AppErrorResult<()> {
    let colors = (colored && log_file.is_none()).then(|| {
        ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red)
    });

    let dispatch = Dispatch::new()
        .level(*level)
        .format(move |out, message, record| {
            let date = humantime::format_rfc3339_seconds(SystemTime::now());
            match &colors {
                Some(colors) => out.finish(format_args!(
                    "[{date} - {}] {message}",
                    colors.color(record.level())
                )),
                None => out.finish(format_args!(
                    "[{date} - {}] {message} [{}]",
                    record.level(),
                    record.target()
                )),
            }
        });

    let dispatch = match log_file {
        Some(path) => dispatch.chain(open_append(path)?),
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch
        .apply()
        .map_err(|e| AppError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(path) => debug!("Logging at {} to {}", *level, path.display()),
        None => debug!("Logging at {} to stderr", *level),
    }
    Ok(())
}

pub(crate) fn open_append(path: &Path) -> AppErrorResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::logger(format!("Failed to open log file {}: {e}", path.display())))
}
