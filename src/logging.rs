//! Tracing subscriber setup.

use gbfr_core::config::logging::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize tracing/logging.
///
/// `RUST_LOG` takes precedence over the configured level. Events go to
/// stderr so they never interleave with the progress lines on stdout.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        "pretty" => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .compact()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
