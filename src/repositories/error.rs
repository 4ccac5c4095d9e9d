//! Errors surfaced by the network repository.

use thiserror::Error;
use tracing::error;

/// Why the set of monitored networks could not be produced
#[derive(Debug, Error)]
pub enum RepositoryError {
	/// The file parsed but a network entry is not monitorable
	#[error("rejected network configuration: {0}")]
	ValidationError(String),

	/// The file could not be read or parsed
	#[error("could not load networks: {0}")]
	LoadError(String),
}

impl RepositoryError {
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!(error = %error, "Network repository unavailable");
		error
	}

	pub fn load_error(msg: impl Into<String>) -> Self {
		let error = Self::LoadError(msg.into());
		error!(error = %error, "Network repository unavailable");
		error
	}
}
