//! Alert message formatting.
//!
//! Every outgoing message, whether raised by a checker or replying to an operator command,
//! is built here so that titles, field names and severities stay consistent across channels.

use std::fmt;

use crate::{
	models::{Alert, AlertKind, CheckerSnapshot, IdentifierKind, Network, Severity},
	utils::constants::{
		BALANCE_TITLE, ERROR_TITLE, LOW_BALANCE_TITLE, RELAYER_LABEL, REQUEST_IDS_TITLE,
		TIMEOUT_TITLE,
	},
};

fn network_pretext(network: &str) -> String {
	format!("*Network*: {}\n*Relayer*: {}", network, RELAYER_LABEL)
}

/// Alert raised when the relayer balance is at or below a threshold
pub fn low_balance(network: &Network, amount: i64, severity: Severity) -> Alert {
	Alert::new(
		AlertKind::LowBalance,
		severity,
		format!(":exclamation: {}", LOW_BALANCE_TITLE),
	)
	.with_pretext(network_pretext(&network.name))
	.with_field("Relayer Address", &network.relayer_address, false)
	.with_field("Current balance", format!("{}{}", amount, network.denom), true)
	.with_field("Network", &network.name, true)
	.with_field(
		"Threshold",
		match severity {
			Severity::Warning => format!("{}{}", network.warning_threshold, network.denom),
			_ => format!("{}{}", network.threshold, network.denom),
		},
		true,
	)
	.for_network(&network.name)
}

/// Alert raised when a request id did not advance since the previous tick
pub fn stale_identifier(
	network: &Network,
	kind: IdentifierKind,
	previous: i64,
	latest: i64,
) -> Alert {
	Alert::new(
		AlertKind::StaleIdentifier(kind),
		Severity::Critical,
		format!(":exclamation: No New {} id", kind.label()),
	)
	.with_pretext(network_pretext(&network.name))
	.with_field("Contract Address", &network.contract_address, false)
	.with_field("Network", &network.name, false)
	.with_field("Previous ID", previous.to_string(), true)
	.with_field("Latest ID", latest.to_string(), true)
	.for_network(&network.name)
}

/// Reply to `get-balance`
pub fn balance_report(snapshot: &CheckerSnapshot) -> Alert {
	Alert::new(AlertKind::CommandReply, Severity::Info, BALANCE_TITLE)
		.with_pretext(network_pretext(&snapshot.network))
		.with_field("Relayer Address", &snapshot.relayer_address, false)
		.with_field("Current balance", snapshot.display_balance(), true)
		.with_field("Network", &snapshot.network, true)
		.for_network(&snapshot.network)
}

/// Reply to `get-ids`
pub fn identifier_report(snapshot: &CheckerSnapshot) -> Alert {
	let ids = snapshot.identifiers;
	Alert::new(AlertKind::CommandReply, Severity::Info, REQUEST_IDS_TITLE)
		.with_pretext(network_pretext(&snapshot.network))
		.with_field("Contract Address", &snapshot.contract_address, false)
		.with_field("Current Request ID", ids.rate.to_string(), true)
		.with_field("Current Median ID", ids.median.to_string(), true)
		.with_field("Current Deviation ID", ids.deviation.to_string(), true)
		.with_field("Network", &snapshot.network, false)
		.for_network(&snapshot.network)
}

/// Reply to `set-timeout`
pub fn suppression_ack(network: &str, duration: &str) -> Alert {
	Alert::new(AlertKind::CommandReply, Severity::Info, TIMEOUT_TITLE)
		.with_text(format!(
			"notification timeout on network {} for {}",
			network, duration
		))
		.for_network(network)
}

/// Reply to a command that could not be executed
pub fn command_error(error: &dyn fmt::Display) -> Alert {
	Alert::new(AlertKind::CommandError, Severity::Critical, ERROR_TITLE)
		.with_text(format!("command error: {}", error))
}
