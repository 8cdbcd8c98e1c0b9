//! # Minnesvakt Telemetry
//!
//! Logging bootstrap for allocator diagnostics.

pub mod logging;

pub use logging::DiagnosticLogger;
