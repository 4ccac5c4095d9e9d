use std::{collections::BTreeMap, path::Path};

use crate::{
	models::{ConfigError, ConfigLoader, MonitorConfig, Network},
	repositories::error::RepositoryError,
};

/// Networks loaded from the monitor configuration file
pub struct NetworkRepository {
	pub networks: BTreeMap<String, Network>,
}

impl NetworkRepository {
	/// Loads and validates the configuration at `path`
	pub fn new(path: &Path) -> Result<Self, RepositoryError> {
		let config = MonitorConfig::load_from_path(path).map_err(|e| match e {
			ConfigError::ValidationError(msg) => {
				RepositoryError::validation_error(format!("Invalid network configuration: {}", msg))
			}
			other => RepositoryError::load_error(format!("Failed to load networks: {}", other)),
		})?;
		Ok(NetworkRepository {
			networks: config.networks,
		})
	}
}

pub trait NetworkRepositoryTrait {
	fn get(&self, network_id: &str) -> Option<Network>;
	fn get_all(&self) -> BTreeMap<String, Network>;
}

impl NetworkRepositoryTrait for NetworkRepository {
	fn get(&self, network_id: &str) -> Option<Network> {
		self.networks.get(network_id).cloned()
	}

	fn get_all(&self) -> BTreeMap<String, Network> {
		self.networks.clone()
	}
}
