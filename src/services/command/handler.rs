use std::sync::Arc;
use tracing::{info, warn};

use crate::{
	models::Alert,
	services::{
		alerting::AlertSink,
		checker::CheckerRegistry,
		command::{Command, CommandError},
		notification::message,
	},
};

/// Executes operator commands against the registry and replies through the alert sink
#[derive(Clone)]
pub struct CommandHandler {
	registry: Arc<CheckerRegistry>,
	sink: AlertSink,
}

impl CommandHandler {
	pub fn new(registry: Arc<CheckerRegistry>, sink: AlertSink) -> Self {
		Self { registry, sink }
	}

	/// Runs a command and builds its reply without enqueuing it
	pub async fn execute(&self, command: &Command) -> Result<Alert, CommandError> {
		let checker = self.registry.get(command.network())?;

		let reply = match command {
			Command::GetBalance { .. } => message::balance_report(&checker.snapshot().await),
			Command::GetIds { .. } => message::identifier_report(&checker.snapshot().await),
			Command::SetTimeout {
				network,
				duration,
				raw,
			} => {
				checker.set_suppression(*duration).await;
				message::suppression_ack(network, raw)
			}
		};
		Ok(reply)
	}

	/// Parses, executes and answers a slash command.
	///
	/// The reply, or an error report, goes through the alert sink. An unknown network is only
	/// returned to the caller.
	///
	/// # Arguments
	/// * `command` - Slash command name, e.g. `/balance`; may be empty
	/// * `text` - Command arguments
	///
	/// # Returns
	/// * `Result<(), CommandError>` - The parse or execution error, if any
	pub async fn handle(&self, command: &str, text: &str) -> Result<(), CommandError> {
		let result = match Command::from_slash(command, text) {
			Ok(parsed) => {
				info!(
					verb = parsed.verb(),
					network = parsed.network(),
					"Executing command"
				);
				self.execute(&parsed).await
			}
			Err(e) => Err(e),
		};

		match result {
			Ok(reply) => {
				self.reply(reply).await;
				Ok(())
			}
			Err(e @ CommandError::NotFound(_)) => {
				warn!(error = %e, "Command rejected");
				Err(e)
			}
			Err(e) => {
				warn!(error = %e, "Command rejected");
				self.reply(message::command_error(&e)).await;
				Err(e)
			}
		}
	}

	async fn reply(&self, alert: Alert) {
		if let Err(e) = self.sink.push(alert).await {
			warn!(error = %e, "Failed to enqueue command reply");
		}
	}
}
