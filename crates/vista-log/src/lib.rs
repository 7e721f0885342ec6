//! Structured logging for the Vista viewer.
//!
//! Console output with uptime stamps and module paths, plus JSON file
//! logging in debug builds or when `debug.log_to_file` is set. The filter comes from `RUST_LOG` when set,
//! otherwise from the config's `debug.log_level`.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vista_config::Config;

/// Filter used when neither `RUST_LOG` nor the config specify one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "vista.log";

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for the JSON log file
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration to use for log level override
///
/// # Examples
///
/// ```no_run
/// use vista_config::Config;
/// use vista_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_from_config(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if file_logging_enabled(debug_build, config)
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        // A subscriber may already be installed (tests, embedding hosts).
        if subscriber.with(file_layer).try_init().is_ok() {
            tracing::debug!(filter = %filter_str, dir = %log_dir.display(), "logging initialized");
        }
        return;
    }

    if subscriber.try_init().is_ok() {
        tracing::debug!(filter = %filter_str, "logging initialized");
    }
}

/// Whether the JSON file layer is installed.
pub fn file_logging_enabled(debug_build: bool, config: Option<&Config>) -> bool {
    debug_build || config.is_some_and(|c| c.debug.log_to_file)
}

/// The filter directive derived from the config, falling back to
/// [`DEFAULT_FILTER`].
pub fn filter_from_config(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
