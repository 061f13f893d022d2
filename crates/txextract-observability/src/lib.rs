//! # txextract-observability
//!
//! Structured logging for txextract.
//!
//! Log lines come from `tracing` macros in the library crates; this crate
//! installs the subscriber. JSON output is compatible with ELK, Loki and
//! CloudWatch. Log levels are configurable per component.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
