//! Observability module
//!
//! Structured logging for `templatedoc` runs.

pub mod logging;

pub use logging::{LogFormat, init_logging};
