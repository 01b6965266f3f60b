//! Logging setup
//!
//! Installs a `tracing` subscriber writing to stderr, so artifacts written to
//! stdout stay clean. `RUST_LOG` takes precedence over the level passed in.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static LOGGING_INIT: Once = Once::new();

/// Initialize the global subscriber once; later calls are no-ops
pub fn init_logging(level: &str) {
    LOGGING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(format!("finreport={}", level)))
            .unwrap_or_else(|_| EnvFilter::new("finreport=warn"));

        // A subscriber installed elsewhere (tests, embedding apps) wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging("debug");
        init_logging("not a level");
        tracing::debug!("logging initialized twice without panicking");
    }
}
