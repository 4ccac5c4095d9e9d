//! Command error types.

use thiserror::Error;

use crate::services::checker::CheckerError;

/// Errors raised while parsing or executing an operator command
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
	#[error("empty command")]
	Empty,

	#[error("unknown command '{0}'")]
	UnknownVerb(String),

	#[error("{verb} requires a {argument} argument")]
	MissingArgument {
		verb: &'static str,
		argument: &'static str,
	},

	#[error("invalid argument '{value}': {reason}")]
	InvalidArgument { value: String, reason: String },

	#[error("network '{0}' not found")]
	NotFound(String),

	#[error("command interface is not running")]
	Unavailable,

	#[error(transparent)]
	Checker(CheckerError),
}

impl From<CheckerError> for CommandError {
	fn from(error: CheckerError) -> Self {
		match error {
			CheckerError::NetworkNotFound(network) => Self::NotFound(network),
			other => Self::Checker(other),
		}
	}
}
