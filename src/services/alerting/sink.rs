use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tracing::warn;

use crate::{
	models::Alert,
	services::alerting::SinkError,
	utils::{
		constants::{ALERTS_PER_NETWORK, ALERT_ENQUEUE_TIMEOUT_SECS},
		metrics::ALERTS_EMITTED,
	},
};

/// Producer handle of the bounded alert queue.
///
/// When the queue is full a push waits up to `enqueue_timeout` for room and then drops the
/// new alert, so a stalled notifier delays producers by at most that long per alert.
#[derive(Debug, Clone)]
pub struct AlertSink {
	sender: mpsc::Sender<Alert>,
	enqueue_timeout: Duration,
}

impl AlertSink {
	/// Creates the queue, returning the producer handle and the single consumer end
	pub fn channel(capacity: usize, enqueue_timeout: Duration) -> (Self, mpsc::Receiver<Alert>) {
		let (sender, receiver) = mpsc::channel(capacity.max(1));
		(
			Self {
				sender,
				enqueue_timeout,
			},
			receiver,
		)
	}

	/// Creates a queue sized for `networks` networks with the default enqueue timeout
	pub fn for_networks(networks: usize) -> (Self, mpsc::Receiver<Alert>) {
		Self::channel(
			Self::capacity_for(networks),
			Duration::from_secs(ALERT_ENQUEUE_TIMEOUT_SECS),
		)
	}

	/// Room for one balance alert and one alert per identifier kind for every network
	pub fn capacity_for(networks: usize) -> usize {
		networks.saturating_mul(ALERTS_PER_NETWORK).max(1)
	}

	/// Enqueues an alert
	///
	/// # Arguments
	/// * `alert` - Alert to deliver
	///
	/// # Returns
	/// * `Result<(), SinkError>` - Error if the alert was dropped
	pub async fn push(&self, alert: Alert) -> Result<(), SinkError> {
		let network = alert.network().unwrap_or("none").to_string();
		let kind = alert.kind().as_str();

		match self.sender.send_timeout(alert, self.enqueue_timeout).await {
			Ok(()) => {
				ALERTS_EMITTED.with_label_values(&[network.as_str(), kind]).inc();
				Ok(())
			}
			Err(SendTimeoutError::Timeout(alert)) => {
				warn!(
					network = %network,
					kind = kind,
					"Alert queue full for {:?}, dropping alert",
					self.enqueue_timeout
				);
				Err(SinkError::Full {
					title: alert.title().to_string(),
				})
			}
			Err(SendTimeoutError::Closed(alert)) => {
				warn!(network = %network, kind = kind, "Alert queue closed, dropping alert");
				Err(SinkError::Closed {
					title: alert.title().to_string(),
				})
			}
		}
	}

	/// Free slots left in the queue
	pub fn remaining_capacity(&self) -> usize {
		self.sender.capacity()
	}
}
