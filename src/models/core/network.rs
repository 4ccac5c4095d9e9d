use serde::{Deserialize, Serialize};

use crate::{
	models::{IdentifierKind, QueryPayload},
	utils::constants::{DEFAULT_QUERY_SYMBOL, DEFAULT_REQUEST_TIMEOUT},
};

/// Monitoring configuration for a single network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Network {
	/// Network name, taken from the key in the configuration file
	#[serde(default)]
	pub name: String,
	/// Base URL of the chain's REST endpoint
	pub rpc_url: String,
	/// Oracle contract whose request ids must advance
	pub contract_address: String,
	/// Account funding the relayer
	pub relayer_address: String,
	/// Token denomination of the relayer balance
	pub denom: String,
	/// Balance at or below which a critical alert is raised
	pub threshold: i64,
	/// Balance at or below which a warning alert is raised
	pub warning_threshold: i64,
	#[serde(default)]
	pub report_median: bool,
	#[serde(default)]
	pub report_deviation: bool,
	/// Interval between ticks, e.g. `30s` or `1m30s`
	pub poll_interval: String,
	#[serde(default = "default_query_symbol")]
	pub query_symbol: String,
	#[serde(default = "default_request_timeout")]
	pub request_timeout: String,
}

fn default_query_symbol() -> String {
	DEFAULT_QUERY_SYMBOL.to_string()
}

fn default_request_timeout() -> String {
	DEFAULT_REQUEST_TIMEOUT.to_string()
}

impl Network {
	/// Identifier kinds checked on every tick; rate is always included
	pub fn enabled_kinds(&self) -> Vec<IdentifierKind> {
		let mut kinds = vec![IdentifierKind::Rate];
		if self.report_median {
			kinds.push(IdentifierKind::Median);
		}
		if self.report_deviation {
			kinds.push(IdentifierKind::Deviation);
		}
		kinds
	}

	/// Query payloads for every enabled identifier kind
	pub fn query_payloads(&self) -> Vec<QueryPayload> {
		self.enabled_kinds()
			.into_iter()
			.map(|kind| QueryPayload::new(kind, &self.query_symbol))
			.collect()
	}
}
