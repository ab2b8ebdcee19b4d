use crate::config::SmileConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name; the daily rotated files use it as their prefix.
pub const LOG_FILE_NAME: &str = "smile.log";

/// `logs/smile.log` inside the journal's data directory.
pub fn journal_log_path(config: &SmileConfig, project_root: &Path) -> PathBuf {
    config
        .data_path(project_root)
        .join("logs")
        .join(LOG_FILE_NAME)
}

/// Turn the `--log-file [PATH]` flag into a concrete path.
///
/// A bare flag logs into the journal found from `cwd`, or into `cwd` itself
/// when no journal has been initialized there yet.
pub fn resolve_log_file(requested: Option<Option<String>>, cwd: &Path) -> Option<PathBuf> {
    match requested? {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(match SmileConfig::load(cwd) {
            Ok((config, root)) => journal_log_path(&config, &root),
            Err(_) => cwd.join(LOG_FILE_NAME),
        }),
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to log file. If None, logs only to stderr
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mademesmile={}", default_level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = log_file {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Rotated daily; the file name becomes the prefix.
        let file_appender = tracing_appender::rolling::daily(
            log_path
                .parent()
                .unwrap_or_else(|| std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(LOG_FILE_NAME)),
        );

        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();

        let _ = subscriber.with(file_layer).try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
