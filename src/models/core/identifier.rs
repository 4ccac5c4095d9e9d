//! Oracle request identifiers.
//!
//! The oracle contract exposes three independent update streams (rate, median and deviation),
//! each identified by a monotonically increasing request id.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of request identifier queried from the oracle contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
	/// Primary price-rate updates, always checked
	Rate,
	/// Median updates, checked when `report_median` is enabled
	Median,
	/// Deviation updates, checked when `report_deviation` is enabled
	Deviation,
}

impl IdentifierKind {
	pub const ALL: [IdentifierKind; 3] = [Self::Rate, Self::Median, Self::Deviation];

	/// Lowercase name used in logs and metric labels
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Rate => "rate",
			Self::Median => "median",
			Self::Deviation => "deviation",
		}
	}

	/// Human readable label used in alert titles
	pub fn label(&self) -> &'static str {
		match self {
			Self::Rate => "Request",
			Self::Median => "Median",
			Self::Deviation => "Deviation",
		}
	}

	fn query_method(&self) -> &'static str {
		match self {
			Self::Rate => "get_ref",
			Self::Median => "get_median_ref",
			Self::Deviation => "get_deviation_ref",
		}
	}
}

impl fmt::Display for IdentifierKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A base64 (URL-safe alphabet) encoded smart-contract query returning the latest request id
/// of one kind, ready to be embedded in a URL path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPayload {
	kind: IdentifierKind,
	encoded: String,
}

impl QueryPayload {
	/// Builds the query `{"<method>": {"symbol": "<symbol>"}}` for the given kind
	pub fn new(kind: IdentifierKind, symbol: &str) -> Self {
		let mut inner = serde_json::Map::new();
		inner.insert("symbol".to_string(), symbol.into());
		let mut query = serde_json::Map::new();
		query.insert(kind.query_method().to_string(), inner.into());

		Self {
			kind,
			encoded: URL_SAFE.encode(serde_json::Value::Object(query).to_string()),
		}
	}

	pub fn kind(&self) -> IdentifierKind {
		self.kind
	}

	pub fn encoded(&self) -> &str {
		&self.encoded
	}
}

/// Last observed identifier per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierSet {
	pub rate: i64,
	pub median: i64,
	pub deviation: i64,
}

impl IdentifierSet {
	pub fn get(&self, kind: IdentifierKind) -> i64 {
		match kind {
			IdentifierKind::Rate => self.rate,
			IdentifierKind::Median => self.median,
			IdentifierKind::Deviation => self.deviation,
		}
	}

	pub fn set(&mut self, kind: IdentifierKind, value: i64) {
		match kind {
			IdentifierKind::Rate => self.rate = value,
			IdentifierKind::Median => self.median = value,
			IdentifierKind::Deviation => self.deviation = value,
		}
	}
}
