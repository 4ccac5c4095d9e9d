use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::{
	services::command::{CommandError, CommandHandler},
	utils::constants::COMMAND_QUEUE_CAPACITY,
};

/// A raw command waiting to be executed
#[derive(Debug)]
pub struct CommandRequest {
	pub command: String,
	pub text: String,
	pub respond_to: oneshot::Sender<Result<(), CommandError>>,
}

/// Submits commands to the running [`CommandInterface`]
#[derive(Debug, Clone)]
pub struct CommandSender {
	sender: mpsc::Sender<CommandRequest>,
}

impl CommandSender {
	/// Queues a command and waits until it has been executed
	pub async fn submit(
		&self,
		command: impl Into<String>,
		text: impl Into<String>,
	) -> Result<(), CommandError> {
		let (respond_to, response) = oneshot::channel();
		self.sender
			.send(CommandRequest {
				command: command.into(),
				text: text.into(),
				respond_to,
			})
			.await
			.map_err(|_| CommandError::Unavailable)?;

		response.await.map_err(|_| CommandError::Unavailable)?
	}
}

/// Task executing operator commands one at a time
pub struct CommandInterface {
	handler: CommandHandler,
	receiver: mpsc::Receiver<CommandRequest>,
}

impl CommandInterface {
	pub fn new(handler: CommandHandler) -> (Self, CommandSender) {
		let (sender, receiver) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
		(Self { handler, receiver }, CommandSender { sender })
	}

	/// Executes commands until `shutdown` turns true or every sender is gone
	pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
		info!("Command interface started");

		loop {
			if *shutdown.borrow() {
				break;
			}

			tokio::select! {
				request = self.receiver.recv() => {
					let Some(request) = request else {
						break;
					};
					let result = self.handler.handle(&request.command, &request.text).await;
					if request.respond_to.send(result).is_err() {
						debug!("Command caller went away before the reply");
					}
				}
				changed = shutdown.changed() => {
					if changed.is_err() {
						break;
					}
				}
			}
		}

		info!("Command interface stopped");
	}
}
