//! Logging initialization
//!
//! Diagnostics go to stderr so they never mix with the report on stdout.
//! `RUST_LOG` takes precedence over the level chosen from `--verbose`.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Returns the filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "depdiff=debug"
    } else {
        "depdiff=warn"
    }
}

/// Initialize the tracing subscriber
///
/// Safe to call more than once; only the first call has an effect.
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
