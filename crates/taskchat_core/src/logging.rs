//! Opt-in file logging for the CLI shell. Diagnostics go to a rotated log
//! file, never to the response stream.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "taskchat";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<(PathBuf, LoggerHandle)> = OnceCell::new();

/// Initializes file logging once per process. Calling again with the same
/// directory is a no-op; a different directory is rejected.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    if let Some((active_dir, _)) = LOGGING_STATE.get() {
        if active_dir == log_dir {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active_dir.display(),
            log_dir.display()
        ));
    }

    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .append()
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    LOGGING_STATE
        .set((log_dir.to_path_buf(), logger))
        .map_err(|_| "logging already initialized".to_string())?;

    Ok(())
}
