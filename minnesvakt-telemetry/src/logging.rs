//! ## minnesvakt-telemetry::logging
//! **tracing bootstrap for the diagnostic stream**
//!
//! The allocator emits its exhaustion, double-free, and leak diagnostics
//! through `tracing`. This module installs the process-wide subscriber that
//! renders them to stderr, so diagnostics never mix with program output.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the diagnostic subscriber. Call once, early in `main`.
#[derive(Clone)]
pub struct DiagnosticLogger;

impl DiagnosticLogger {
    /// Install a stderr fmt subscriber with `RUST_LOG`-style filtering,
    /// defaulting to `info`.
    ///
    /// # Panics
    /// If a global subscriber is already installed.
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init()
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn warnings_reach_the_collector() {
        tracing::warn!("48 bytes leaked in 3 objects.");
        assert!(logs_contain("bytes leaked"));
    }
}
