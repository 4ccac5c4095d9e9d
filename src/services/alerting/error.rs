//! Alert sink error types.

use thiserror::Error;

/// Errors raised when enqueuing an alert
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
	/// The queue stayed full for the whole enqueue timeout; the alert was dropped
	#[error("Alert queue is full, dropped '{title}'")]
	Full { title: String },

	/// The publisher is gone; the alert was dropped
	#[error("Alert queue is closed, dropped '{title}'")]
	Closed { title: String },
}
