use tracing::metadata::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, filter::ParseError, fmt, layer::SubscriberExt};

pub mod file;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "NWM_LOG";
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Builds the filter, falling back to the default level when the directives don't parse.
#[must_use]
pub fn parse_log_level(level_regex: &str) -> (EnvFilter, Option<ParseError>) {
    let builder = || EnvFilter::builder().with_default_directive(DEFAULT_LEVEL.into());
    match builder().parse(level_regex) {
        Ok(filter) => (filter, None),
        Err(err) => (builder().parse_lossy(""), Some(err)),
    }
}

/// Installs the global subscriber: stderr plus the log file when it can be opened.
///
/// The returned guard flushes the file writer when dropped, keep it alive until exit.
pub fn setup_logging() -> Option<WorkerGuard> {
    let level = std::env::var(LOG_ENV).unwrap_or_default();
    let (filter, parse_err) = parse_log_level(&level);

    let (file_layer, guard) = match file::writer() {
        Ok((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        Err(err) => {
            eprintln!("Couldn't open the log file: {err:?}");
            (None, None)
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Couldn't setup global subscriber (logger): {err}");
    }

    if let Some(err) = parse_err {
        tracing::warn!("Invalid {} value {:?}, using {}: {}", LOG_ENV, level, DEFAULT_LEVEL, err);
    }
    guard
}
