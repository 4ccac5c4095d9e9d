//! Slack slash-command endpoint.
//!
//! Slack posts `application/x-www-form-urlencoded` bodies carrying `command` and `text`.
//! When a signing secret is configured every request must carry a fresh, valid
//! `X-Slack-Signature`; see <https://api.slack.com/authentication/verifying-requests-from-slack>.

use actix_web::{web, HttpRequest, HttpResponse};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::time::Duration;
use tracing::warn;

use crate::{
	services::command::{CommandError, CommandSender},
	utils::constants::{COMMAND_REPLY_WAIT_MILLIS, SLACK_SIGNATURE_MAX_AGE_SECS},
};

type HmacSha256 = Hmac<Sha256>;

const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
const SIGNATURE_HEADER: &str = "X-Slack-Signature";

/// Shared state of the slash-command route
pub struct SlashCommandState {
	pub sender: CommandSender,
	pub signing_secret: Option<String>,
}

/// Checks a `v0=` signature over `v0:{timestamp}:{body}`
///
/// # Arguments
/// * `secret` - Slack signing secret
/// * `timestamp` - Value of the timestamp header, Unix seconds
/// * `signature` - Value of the signature header
/// * `body` - Raw request body
/// * `now` - Current Unix time in seconds
pub fn verify_slack_signature(
	secret: &str,
	timestamp: &str,
	signature: &str,
	body: &[u8],
	now: i64,
) -> bool {
	let Ok(sent_at) = timestamp.parse::<i64>() else {
		return false;
	};
	// Untrusted header; abs_diff never overflows
	if now.abs_diff(sent_at) > SLACK_SIGNATURE_MAX_AGE_SECS.unsigned_abs() {
		return false;
	}

	let Some(expected) = signature
		.strip_prefix("v0=")
		.and_then(|digest| hex::decode(digest).ok())
	else {
		return false;
	};

	let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
		return false;
	};
	mac.update(format!("v0:{}:", timestamp).as_bytes());
	mac.update(body);
	mac.verify_slice(&expected).is_ok()
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
	req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn parse_form(body: &[u8]) -> (String, String) {
	let mut command = String::new();
	let mut text = String::new();
	for (key, value) in url::form_urlencoded::parse(body) {
		match key.as_ref() {
			"command" => command = value.into_owned(),
			"text" => text = value.into_owned(),
			_ => {}
		}
	}
	(command, text)
}

fn ephemeral(text: &str) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"response_type": "ephemeral",
		"text": text
	}))
}

/// Handles `POST /slack/commands`.
///
/// The reply travels through the alert sink. Errors that never reach the sink (unknown
/// network, command interface down) are returned inline instead.
pub async fn slash_command_handler(
	req: HttpRequest,
	body: web::Bytes,
	state: web::Data<SlashCommandState>,
) -> HttpResponse {
	if let Some(secret) = &state.signing_secret {
		let verified = match (header(&req, TIMESTAMP_HEADER), header(&req, SIGNATURE_HEADER)) {
			(Some(timestamp), Some(signature)) => verify_slack_signature(
				secret,
				timestamp,
				signature,
				&body,
				chrono::Utc::now().timestamp(),
			),
			_ => false,
		};
		if !verified {
			warn!("Rejected slash command with missing or invalid signature");
			return HttpResponse::Unauthorized().finish();
		}
	}

	let (command, text) = parse_form(&body);
	let wait = Duration::from_millis(COMMAND_REPLY_WAIT_MILLIS);

	match tokio::time::timeout(wait, state.sender.submit(command, text)).await {
		Ok(Err(e @ (CommandError::NotFound(_) | CommandError::Unavailable))) => {
			ephemeral(&format!("command error: {}", e))
		}
		_ => ephemeral(""),
	}
}
