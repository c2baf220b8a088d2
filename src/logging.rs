use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the log filter (e.g. `debug`, `argset=trace`).
pub const LOG_FILTER_ENV: &str = "ARGSET_LOG";
/// Env var holding a log file path. Logs go to stderr when unset.
pub const LOG_FILE_ENV: &str = "ARGSET_LOG_FILE";

/// Initialize tracing.
///
/// Stdout is reserved for flag tokens, so logs go to stderr (or to the file
/// named by `ARGSET_LOG_FILE`). The filter comes from `ARGSET_LOG`, falling
/// back to `debug` when `verbose` is set and `warn` otherwise.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let log_file = std::env::var(LOG_FILE_ENV)
        .ok()
        .and_then(|path| match std::fs::File::create(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: Failed to create log file {}: {}", path, e);
                None
            }
        });

    let registry = tracing_subscriber::registry().with(filter);
    let result = match log_file {
        Some(file) => registry
            .with(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true),
            )
            .try_init(),
        None => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}
