//! Log output for the command line tool.
//!
//! Writes compact lines to stderr so stdout stays clean for JSON output.
//! `RUST_LOG` wins over the `-v` count when set.

use std::io;

use tracing_subscriber::EnvFilter;

/// Default level for a given `-v` count.
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
