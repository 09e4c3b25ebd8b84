//! Log output for the CLI.
//!
//! Logs go to stderr so that CSV on stdout stays clean. `RUST_LOG`
//! overrides the level passed on the command line.

use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::error::{JunctionError, Result};

/// Install a global subscriber filtering at `default_level` (e.g. "info").
pub fn init_subscriber(default_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);
    set_global_default(subscriber).map_err(|e| JunctionError::OutputError {
        message: format!("failed to install log subscriber: {e}"),
    })
}
