use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;

/// Installs the global `tracing` subscriber
///
/// The filter comes from the configured log level, falling back to `info`
/// when it does not parse. Returns false if a subscriber was already set.
pub fn init(config: &Config) -> bool {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
