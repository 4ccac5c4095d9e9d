//! Notification service implementation.
//!
//! `message` turns observations and command results into [`Alert`]s, `payload_builder`
//! renders an alert into a channel payload and `slack` delivers it.

use async_trait::async_trait;

mod error;
pub mod message;
mod payload_builder;
mod slack;

pub use error::NotificationError;
pub use payload_builder::{severity_color, AlertPayloadBuilder, SlackPayloadBuilder};
pub use slack::SlackNotifier;

use crate::models::Alert;

/// Delivers alerts to an operator-facing channel
#[async_trait]
pub trait Notifier: Send + Sync {
	async fn notify(&self, alert: &Alert) -> Result<(), NotificationError>;
}
