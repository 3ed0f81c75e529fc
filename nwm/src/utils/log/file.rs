use anyhow::Result;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use xdg::BaseDirectories;

const LOG_FILE_NAME: &str = "nwm.log";

/// A non-blocking writer appending to `$XDG_CACHE_HOME/nwm/nwm.log`.
///
/// # Errors
///
/// Errors when the cache directory can't be found or created.
pub fn writer() -> Result<(NonBlocking, WorkerGuard)> {
    let dirs = BaseDirectories::with_prefix("nwm")?;
    let path = dirs.place_cache_file(LOG_FILE_NAME)?;
    let dir = path
        .parent()
        .map_or_else(|| dirs.get_cache_home(), std::path::Path::to_path_buf);
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(appender))
}
