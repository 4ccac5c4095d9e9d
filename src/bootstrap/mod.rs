//! Bootstrap module for wiring the monitor together.
//!
//! Builds the alert queue, one checker per network, the alert publisher and the command
//! interface, and tears them down in an order that never leaves a producer sending into a
//! closed queue:
//!
//! 1. flip the shutdown flag
//! 2. join every checker task
//! 3. join the command interface
//! 4. drop the remaining sink handles
//! 5. let the publisher drain the queue and exit

use std::{error::Error, sync::Arc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{error, info};

use crate::{
	models::{ConfigError, Network},
	services::{
		alerting::{AlertPublisher, AlertSink, PublisherStats},
		chain::{ChainClient, ChainClientError, CosmwasmClient},
		checker::{ChainClientFactory, CheckerRegistry, CheckerTasks},
		command::{CommandHandler, CommandInterface, CommandSender},
		notification::{NotificationError, Notifier, SlackNotifier},
	},
	utils::constants::DEFAULT_SLACK_API_URL,
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Slack credentials and endpoints read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackSettings {
	pub token: String,
	pub channel: String,
	/// Enables signature checks on the command endpoint
	pub signing_secret: Option<String>,
	pub api_url: String,
}

impl SlackSettings {
	/// Reads `SLACK_TOKEN`, `SLACK_CHANNEL`, `SLACK_SIGNING_SECRET` and `SLACK_API_URL`
	pub fn from_env() -> std::result::Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Same as [`SlackSettings::from_env`] with an injectable variable source
	pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let required = |key: &str| {
			non_empty(key).ok_or_else(|| {
				ConfigError::environment_error(format!("{} must be set and non-empty", key))
			})
		};

		Ok(Self {
			token: required("SLACK_TOKEN")?,
			channel: required("SLACK_CHANNEL")?,
			signing_secret: non_empty("SLACK_SIGNING_SECRET"),
			api_url: non_empty("SLACK_API_URL").unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
		})
	}

	pub fn notifier(&self) -> std::result::Result<SlackNotifier, NotificationError> {
		SlackNotifier::new(
			self.api_url.clone(),
			self.token.clone(),
			self.channel.clone(),
		)
	}
}

/// Creates the REST client a network's checker queries through
pub fn cosmwasm_client_factory(
	network: &Network,
) -> std::result::Result<Arc<dyn ChainClient>, ChainClientError> {
	Ok(Arc::new(CosmwasmClient::for_network(network)?))
}

/// Handles of every running task
pub struct RunningServices {
	shutdown_tx: watch::Sender<bool>,
	registry: Arc<CheckerRegistry>,
	sink: AlertSink,
	checker_tasks: CheckerTasks,
	command_sender: CommandSender,
	command_task: JoinHandle<()>,
	publisher_task: JoinHandle<PublisherStats>,
}

/// Starts checkers, the publisher and the command interface.
///
/// Must be called from within a tokio runtime.
///
/// # Arguments
/// * `networks` - Validated network configurations
/// * `notifier` - Delivery channel for every alert
/// * `client_factory` - Builds each network's chain client
///
/// # Returns
/// * `Result<RunningServices>` - Error if any checker cannot be created; nothing is spawned then
pub fn start_services<'a, I>(
	networks: I,
	notifier: Arc<dyn Notifier>,
	client_factory: &ChainClientFactory,
) -> Result<RunningServices>
where
	I: IntoIterator<Item = &'a Network>,
{
	let networks: Vec<&Network> = networks.into_iter().collect();
	let (sink, receiver) = AlertSink::for_networks(networks.len());

	let registry = Arc::new(CheckerRegistry::build(
		networks.iter().copied(),
		&sink,
		client_factory,
	)?);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let publisher_task = AlertPublisher::new(notifier, receiver).spawn();
	let checker_tasks = registry.spawn_all(&shutdown_rx);

	let (command_interface, command_sender) =
		CommandInterface::new(CommandHandler::new(registry.clone(), sink.clone()));
	let command_task = tokio::spawn(command_interface.run(shutdown_rx));

	info!(
		networks = ?registry.names(),
		"Monitoring {} networks",
		registry.len()
	);

	Ok(RunningServices {
		shutdown_tx,
		registry,
		sink,
		checker_tasks,
		command_sender,
		command_task,
		publisher_task,
	})
}

impl RunningServices {
	/// Handle for submitting operator commands
	pub fn command_sender(&self) -> CommandSender {
		self.command_sender.clone()
	}

	pub fn registry(&self) -> Arc<CheckerRegistry> {
		self.registry.clone()
	}

	/// Stops every task and waits for queued alerts to be delivered
	pub async fn shutdown(self) -> PublisherStats {
		let Self {
			shutdown_tx,
			registry,
			sink,
			checker_tasks,
			command_sender,
			command_task,
			publisher_task,
		} = self;

		let _ = shutdown_tx.send(true);

		let failed = checker_tasks.join_all().await;
		if failed > 0 {
			error!("{} checker tasks did not stop cleanly", failed);
		}

		drop(command_sender);
		if let Err(e) = command_task.await {
			error!("Command interface task failed: {}", e);
		}

		// Last producers gone; the publisher drains and exits
		drop(registry);
		drop(sink);

		match publisher_task.await {
			Ok(stats) => stats,
			Err(e) => {
				error!("Alert publisher task failed: {}", e);
				PublisherStats::default()
			}
		}
	}
}
