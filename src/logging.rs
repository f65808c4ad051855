//! Logging setup for the `ataman` binary
//!
//! Console output respects the RUST_LOG env var:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=ataman::core=debug` - module-level filtering, e.g. dropped entries
//!
//! Without RUST_LOG the level is `warn`, or `debug` when verbose.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber. Call once, at startup.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_line_number(verbose)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
