//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout carries only translation text. The filter is
//! read from `EDITRANS_LOG`, then `RUST_LOG`, defaulting to `warn`.

use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "EDITRANS_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
