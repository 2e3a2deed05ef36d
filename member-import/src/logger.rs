//! Logging setup
//!
//! Logs go to stderr (stdout carries the JSON import report), or to a daily
//! rolling `member-import` file when `LOG_DIR` points at an existing directory.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::ImportConfig;

/// Install the global subscriber; `RUST_LOG` overrides `LOG_LEVEL`
///
/// Later calls are ignored.
pub fn init_logger(config: &ImportConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(dir) = config.log_dir.as_deref().map(Path::new)
        && dir.is_dir()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "member-import");
        let _ = subscriber
            .with_writer(file_appender)
            .with_ansi(false)
            .try_init();
        return;
    }

    let _ = subscriber.with_writer(std::io::stderr).try_init();
}
