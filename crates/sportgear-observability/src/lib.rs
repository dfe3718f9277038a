//! Observability for the SportGear storefront core.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging scoped to a browsing session
//! - `LogBuilder` - Fluent construction of log entries with typed fields
//! - `LogLevel` / `LogFormat` - Filtering and output selection, parseable from config

mod logging;

pub use logging::*;
