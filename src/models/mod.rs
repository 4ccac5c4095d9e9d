//! Domain models and data structures for relayer monitoring.
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Network, Alert, identifiers, snapshots)

mod config;
mod core;

// Re-export core types
pub use core::{
	Alert, AlertField, AlertKind, CheckerSnapshot, IdentifierKind, IdentifierSet, Network,
	QueryPayload, Severity,
};

// Re-export config types
pub use config::{ConfigError, ConfigLoader, MonitorConfig};
