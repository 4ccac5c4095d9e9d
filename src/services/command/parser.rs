use std::time::Duration;

use crate::{services::command::CommandError, utils::parse_duration};

const GET_BALANCE: &str = "get-balance";
const GET_IDS: &str = "get-ids";
const SET_TIMEOUT: &str = "set-timeout";

/// A validated operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Report the last observed balance of a network's relayer
	GetBalance { network: String },
	/// Report the last observed request ids of a network
	GetIds { network: String },
	/// Suppress a network's alerts for `duration`
	SetTimeout {
		network: String,
		duration: Duration,
		/// The duration as typed by the operator, echoed back in the reply
		raw: String,
	},
}

impl Command {
	/// Parses `verb network [argument]`
	pub fn parse(text: &str) -> Result<Self, CommandError> {
		let mut tokens = text.split_whitespace();
		let verb = tokens.next().ok_or(CommandError::Empty)?;

		let command = match verb {
			GET_BALANCE => Self::GetBalance {
				network: required(tokens.next(), GET_BALANCE, "network")?,
			},
			GET_IDS => Self::GetIds {
				network: required(tokens.next(), GET_IDS, "network")?,
			},
			SET_TIMEOUT => {
				let network = required(tokens.next(), SET_TIMEOUT, "network")?;
				let raw = required(tokens.next(), SET_TIMEOUT, "duration")?;
				let duration =
					parse_duration(&raw).map_err(|reason| CommandError::InvalidArgument {
						value: raw.clone(),
						reason,
					})?;
				Self::SetTimeout {
					network,
					duration,
					raw,
				}
			}
			other => return Err(CommandError::UnknownVerb(other.to_string())),
		};

		match tokens.next() {
			Some(extra) => Err(CommandError::InvalidArgument {
				value: extra.to_string(),
				reason: format!("unexpected argument for {}", command.verb()),
			}),
			None => Ok(command),
		}
	}

	/// Parses a Slack slash command, e.g. `/balance` with text `juno`.
	///
	/// `/balance`, `/relayerstatus` and `/timeout` map to their verbs; the verbs themselves are
	/// accepted with or without the leading slash, and an empty `command` parses `text` alone.
	pub fn from_slash(command: &str, text: &str) -> Result<Self, CommandError> {
		let command = command.trim();
		if command.is_empty() {
			return Self::parse(text);
		}

		let verb = match command.trim_start_matches('/') {
			"balance" | GET_BALANCE => GET_BALANCE,
			"relayerstatus" | GET_IDS => GET_IDS,
			"timeout" | SET_TIMEOUT => SET_TIMEOUT,
			_ => return Err(CommandError::UnknownVerb(command.to_string())),
		};
		Self::parse(&format!("{} {}", verb, text))
	}

	pub fn verb(&self) -> &'static str {
		match self {
			Self::GetBalance { .. } => GET_BALANCE,
			Self::GetIds { .. } => GET_IDS,
			Self::SetTimeout { .. } => SET_TIMEOUT,
		}
	}

	pub fn network(&self) -> &str {
		match self {
			Self::GetBalance { network }
			| Self::GetIds { network }
			| Self::SetTimeout { network, .. } => network,
		}
	}
}

fn required(
	token: Option<&str>,
	verb: &'static str,
	argument: &'static str,
) -> Result<String, CommandError> {
	token
		.map(str::to_string)
		.ok_or(CommandError::MissingArgument { verb, argument })
}
