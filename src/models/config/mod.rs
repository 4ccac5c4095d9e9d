//! Configuration loading and validation.
//!
//! The monitor reads a single JSON document listing every network to watch. Loading fails
//! fast: a configuration that does not validate never produces a running checker.

use std::path::Path;

mod error;
mod monitor_config;
mod network_config;

pub use error::ConfigError;
pub use monitor_config::MonitorConfig;

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Load and validate a configuration from a file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Validate the configuration
	fn validate(&self) -> Result<(), ConfigError>;

	/// Check if a file is a JSON file based on extension
	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
