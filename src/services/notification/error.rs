//! Slack delivery errors.
//!
//! The publisher logs and counts these; none of them is retried.

use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum NotificationError {
	/// The request never produced a 2xx response
	#[error("Slack request failed: {0}")]
	NetworkError(String),
	/// Token, channel or endpoint unusable
	#[error("Slack notifier misconfigured: {0}")]
	ConfigError(String),
	/// Slack answered `ok: false`
	#[error("Slack rejected the message: {0}")]
	DeliveryError(String),
}

impl NotificationError {
	pub fn network_error(msg: impl Into<String>) -> Self {
		Self::NetworkError(msg.into()).logged()
	}

	pub fn config_error(msg: impl Into<String>) -> Self {
		Self::ConfigError(msg.into()).logged()
	}

	pub fn delivery_error(msg: impl Into<String>) -> Self {
		Self::DeliveryError(msg.into()).logged()
	}

	fn logged(self) -> Self {
		error!(error = %self, "Notification failed");
		self
	}
}

impl From<reqwest::Error> for NotificationError {
	fn from(error: reqwest::Error) -> Self {
		let reason = match error.status() {
			Some(status) => format!("status {}: {}", status.as_u16(), error),
			None if error.is_timeout() => format!("timed out: {}", error),
			None => error.to_string(),
		};
		Self::network_error(reason)
	}
}
