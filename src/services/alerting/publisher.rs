use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
	models::Alert,
	services::notification::Notifier,
	utils::metrics::{NOTIFICATIONS_FAILED, NOTIFICATIONS_SENT},
};

/// Delivery counters reported when the publisher exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublisherStats {
	pub delivered: u64,
	pub failed: u64,
}

/// Single consumer of the alert queue
pub struct AlertPublisher {
	notifier: Arc<dyn Notifier>,
	receiver: mpsc::Receiver<Alert>,
}

impl AlertPublisher {
	pub fn new(notifier: Arc<dyn Notifier>, receiver: mpsc::Receiver<Alert>) -> Self {
		Self { notifier, receiver }
	}

	/// Delivers alerts until every [`AlertSink`](crate::services::alerting::AlertSink) handle
	/// has been dropped and the queue is empty.
	///
	/// Delivery failures are logged and counted; the alert is not retried.
	pub async fn run(mut self) -> PublisherStats {
		let mut stats = PublisherStats::default();

		while let Some(alert) = self.receiver.recv().await {
			match self.notifier.notify(&alert).await {
				Ok(()) => {
					debug!(title = alert.title(), "Alert delivered");
					NOTIFICATIONS_SENT.inc();
					stats.delivered += 1;
				}
				Err(e) => {
					warn!(
						title = alert.title(),
						network = alert.network().unwrap_or("none"),
						error = %e,
						"Failed to deliver alert, dropping it"
					);
					NOTIFICATIONS_FAILED.inc();
					stats.failed += 1;
				}
			}
		}

		info!(
			delivered = stats.delivered,
			failed = stats.failed,
			"Alert publisher stopped"
		);
		stats
	}

	/// Runs the publisher on its own task
	pub fn spawn(self) -> JoinHandle<PublisherStats> {
		tokio::spawn(self.run())
	}
}
