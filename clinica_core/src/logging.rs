//! Logging infrastructure for the clinic shell.
//!
//! The library only emits `tracing` events. Nothing is printed unless a
//! binary installs a subscriber through one of these functions.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at the default `warn` level
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// RUST_LOG still takes precedence. Events go to stderr so they never mix
/// with the shell's prompts on stdout.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
