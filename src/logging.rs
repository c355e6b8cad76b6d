//! Log output goes to a daily file; the console belongs to the dashboard.

use crate::config::paths;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. Safe to call twice; the second call is ignored.
pub fn setup() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_dir = paths::log_dir();

    let file_layer = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, &log_dir, paths::LOG_FILE_NAME);

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_filter(filter),
            )
        }
        Err(e) => {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
            None
        }
    };

    if tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialized: {:?}",
        log_dir
    );
}
