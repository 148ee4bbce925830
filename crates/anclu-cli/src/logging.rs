use std::io;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ANCLU_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. Stdout carries report output only.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
