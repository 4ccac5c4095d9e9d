//! Slack payload builder implementation.
//!
//! Renders an [`Alert`] into a `chat.postMessage` body with a single attachment.

use serde_json::json;

use crate::{
	models::{Alert, Severity},
	utils::constants::ALERT_FOOTER,
};

/// Trait for building channel payloads.
pub trait AlertPayloadBuilder: Send + Sync {
	/// Builds the request body delivering `alert` to `channel`.
	///
	/// # Arguments
	///
	/// * `channel` - Destination channel identifier.
	/// * `alert` - The alert to render.
	///
	/// # Returns
	///
	/// A `serde_json::Value` representing the payload.
	fn build_payload(&self, channel: &str, alert: &Alert) -> serde_json::Value;
}

/// Attachment color for a severity
pub fn severity_color(severity: Severity) -> &'static str {
	match severity {
		Severity::Critical => "danger",
		Severity::Warning => "#ff9966",
		Severity::Info => "good",
	}
}

/// A payload builder for Slack attachments.
pub struct SlackPayloadBuilder;

impl AlertPayloadBuilder for SlackPayloadBuilder {
	fn build_payload(&self, channel: &str, alert: &Alert) -> serde_json::Value {
		let fields: Vec<serde_json::Value> = alert
			.fields()
			.iter()
			.map(|field| {
				json!({
					"title": field.title,
					"value": format!("```{}```", field.value),
					"short": field.short
				})
			})
			.collect();

		let mut attachment = json!({
			"color": severity_color(alert.severity()),
			"title": alert.title(),
			"fields": fields,
			"footer": ALERT_FOOTER,
			"ts": alert.timestamp().timestamp(),
			"mrkdwn_in": ["pretext", "text", "fields"]
		});
		if let Some(pretext) = alert.pretext() {
			attachment["pretext"] = json!(pretext);
		}
		if let Some(text) = alert.text() {
			attachment["text"] = json!(text);
		}

		json!({
			"channel": channel,
			"attachments": [attachment]
		})
	}
}
