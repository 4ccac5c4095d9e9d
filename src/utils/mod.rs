//! Utility modules for common functionality.
//!
//! - constants: Constants for the application
//! - logging: Logging utilities
//! - metrics: Prometheus metrics and the HTTP server exposing them
//! - parsing: Duration parsing

mod parsing;

pub mod constants;
pub mod logging;
pub mod metrics;

pub use parsing::*;
