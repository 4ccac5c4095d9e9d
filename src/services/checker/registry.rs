use std::{collections::HashMap, sync::Arc};
use tokio::sync::watch;
use tracing::info;

use crate::{
	models::Network,
	services::{
		alerting::AlertSink,
		chain::{ChainClient, ChainClientError},
		checker::{CheckerError, CheckerTasks, NetworkChecker},
	},
};

/// Builds the chain client used by one network's checker
pub type ChainClientFactory =
	dyn Fn(&Network) -> Result<Arc<dyn ChainClient>, ChainClientError> + Send + Sync;

/// Immutable name-keyed set of checkers, built once at startup
pub struct CheckerRegistry {
	checkers: HashMap<String, Arc<NetworkChecker>>,
}

impl CheckerRegistry {
	/// Creates one checker per network
	///
	/// # Arguments
	/// * `networks` - Validated network configurations
	/// * `sink` - Queue shared by every checker
	/// * `client_factory` - Builds the client each checker queries through
	///
	/// # Returns
	/// * `Result<Self, CheckerError>` - Error on the first network that cannot be set up
	pub fn build<'a, I>(
		networks: I,
		sink: &AlertSink,
		client_factory: &ChainClientFactory,
	) -> Result<Self, CheckerError>
	where
		I: IntoIterator<Item = &'a Network>,
	{
		let mut checkers = HashMap::new();

		for network in networks {
			let client = client_factory(network).map_err(|source| CheckerError::ClientError {
				network: network.name.clone(),
				source,
			})?;
			let checker = NetworkChecker::new(network.clone(), client, sink.clone())?;
			checkers.insert(network.name.clone(), Arc::new(checker));
		}

		info!("Created {} network checkers", checkers.len());
		Ok(Self { checkers })
	}

	/// Spawns one task per checker; every task stops once `shutdown` turns true
	pub fn spawn_all(&self, shutdown: &watch::Receiver<bool>) -> CheckerTasks {
		let mut tasks = CheckerTasks::new();
		for (name, checker) in &self.checkers {
			let handle = tokio::spawn(checker.clone().run(shutdown.clone()));
			tasks.push(name.clone(), handle);
		}
		tasks
	}

	/// Looks up a checker by network name
	pub fn get(&self, network: &str) -> Result<Arc<NetworkChecker>, CheckerError> {
		self.checkers
			.get(network)
			.cloned()
			.ok_or_else(|| CheckerError::NetworkNotFound(network.to_string()))
	}

	/// Network names in sorted order
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.checkers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.checkers.is_empty()
	}
}
