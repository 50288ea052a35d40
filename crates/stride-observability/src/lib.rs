//! Logging setup for Stride binaries.
//!
//! Library crates only emit `tracing` events. Binaries call
//! [`init_logging`] once at startup to install a stderr subscriber in either
//! JSON (log aggregation) or human-readable form.

mod logging;

pub use logging::*;
