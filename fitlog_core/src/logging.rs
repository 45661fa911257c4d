//! Tracing setup for the `fitlog` binary.
//!
//! Reports go to stdout, so diagnostics are written to stderr and stay
//! quiet unless asked for.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// Shows warnings by default (a corrupt data file, for instance) and
/// everything down to debug with `verbose`. `RUST_LOG` overrides both.
/// Calling it a second time is a no-op.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().without_time().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
