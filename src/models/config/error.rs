//! Errors raised while loading the network configuration and the Slack settings.

use thiserror::Error;
use tracing::error;

/// Why the monitor refused to start from its configuration
#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// A network entry or the file as a whole breaks a validation rule
	#[error("invalid configuration: {0}")]
	ValidationError(String),

	/// The file is not the expected JSON shape
	#[error("malformed configuration: {0}")]
	ParseError(String),

	/// The file is missing, unreadable or not a `.json` file
	#[error("cannot read configuration: {0}")]
	FileError(String),

	/// A required environment variable is unset or blank
	#[error("missing environment setting: {0}")]
	EnvironmentError(String),
}

impl ConfigError {
	fn logged(self) -> Self {
		error!(error = %self, "Configuration rejected");
		self
	}

	pub fn validation_error(msg: impl Into<String>) -> Self {
		Self::ValidationError(msg.into()).logged()
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		Self::ParseError(msg.into()).logged()
	}

	pub fn file_error(msg: impl Into<String>) -> Self {
		Self::FileError(msg.into()).logged()
	}

	pub fn environment_error(msg: impl Into<String>) -> Self {
		Self::EnvironmentError(msg.into()).logged()
	}
}

impl From<std::io::Error> for ConfigError {
	fn from(err: std::io::Error) -> Self {
		Self::file_error(err.to_string())
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(format!("line {} column {}: {}", err.line(), err.column(), err))
	}
}
