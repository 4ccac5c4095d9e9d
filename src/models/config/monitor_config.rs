use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

use crate::models::{ConfigError, ConfigLoader, Network};

/// Top-level configuration document
///
/// ```json
/// {
///   "networks": {
///     "juno": {
///       "rpc_url": "https://rest.juno.example.com",
///       "contract_address": "juno1...",
///       "relayer_address": "juno1...",
///       "denom": "ujuno",
///       "threshold": 10000,
///       "warning_threshold": 20000,
///       "report_median": true,
///       "report_deviation": false,
///       "poll_interval": "30s"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MonitorConfig {
	pub networks: BTreeMap<String, Network>,
}

impl MonitorConfig {
	/// Parses a configuration document and fills in network names from their keys
	pub fn from_json(content: &str) -> Result<Self, ConfigError> {
		let mut config: MonitorConfig = serde_json::from_str(content)?;
		for (name, network) in config.networks.iter_mut() {
			network.name = name.clone();
		}
		Ok(config)
	}
}

impl ConfigLoader for MonitorConfig {
	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			return Err(ConfigError::file_error(format!(
				"configuration file {} not found",
				path.display()
			)));
		}
		if !Self::is_json_file(path) {
			return Err(ConfigError::file_error(format!(
				"configuration file {} must be a .json file",
				path.display()
			)));
		}

		let content = std::fs::read_to_string(path)?;
		let config = Self::from_json(&content)?;

		// Validate the config after loading
		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.networks.is_empty() {
			return Err(ConfigError::validation_error(
				"at least one network must be configured",
			));
		}

		for network in self.networks.values() {
			network.validate().map_err(ConfigError::validation_error)?;
		}

		Ok(())
	}
}
