//! Slack notification implementation.
//!
//! Delivers alerts through the Web API `chat.postMessage` method using a bot token,
//! so replies to slash commands and checker alerts land in the same channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
	models::Alert,
	services::notification::{
		AlertPayloadBuilder, NotificationError, Notifier, SlackPayloadBuilder,
	},
	utils::constants::SLACK_REQUEST_TIMEOUT_SECS,
};

/// Implementation of Slack notifications via the Web API
pub struct SlackNotifier {
	/// Base URL of the Slack Web API, e.g. `https://slack.com/api`
	api_url: String,
	/// Bot token sent as a bearer credential
	token: String,
	/// Destination channel id
	channel: String,
	/// HTTP client for API requests
	client: Client,
}

/// The subset of the `chat.postMessage` response we inspect
#[derive(Deserialize)]
struct SlackResponse {
	ok: bool,
	#[serde(default)]
	error: Option<String>,
}

impl SlackNotifier {
	/// Creates a new Slack notifier instance
	///
	/// # Arguments
	/// * `api_url` - Slack Web API base URL
	/// * `token` - Bot token
	/// * `channel` - Channel that receives every alert
	pub fn new(api_url: String, token: String, channel: String) -> Result<Self, NotificationError> {
		if token.trim().is_empty() {
			return Err(NotificationError::config_error("Slack token must not be empty"));
		}
		if channel.trim().is_empty() {
			return Err(NotificationError::config_error(
				"Slack channel must not be empty",
			));
		}

		let client = Client::builder()
			.timeout(Duration::from_secs(SLACK_REQUEST_TIMEOUT_SECS))
			.build()
			.map_err(|e| NotificationError::config_error(e.to_string()))?;

		Ok(Self {
			api_url: api_url.trim_end_matches('/').to_string(),
			token,
			channel,
			client,
		})
	}

	fn post_message_url(&self) -> String {
		format!("{}/chat.postMessage", self.api_url)
	}
}

#[async_trait]
impl Notifier for SlackNotifier {
	/// Sends an alert to the configured channel
	///
	/// # Arguments
	/// * `alert` - The alert to deliver
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or error
	async fn notify(&self, alert: &Alert) -> Result<(), NotificationError> {
		let payload = SlackPayloadBuilder.build_payload(&self.channel, alert);

		let response = self
			.client
			.post(self.post_message_url())
			.bearer_auth(&self.token)
			.json(&payload)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(NotificationError::network_error(format!(
				"Slack API returned status {}",
				status
			)));
		}

		let body: SlackResponse = response.json().await?;
		if !body.ok {
			return Err(NotificationError::delivery_error(
				body.error.unwrap_or_else(|| "unknown error".to_string()),
			));
		}

		Ok(())
	}
}
