use url::Url;

use crate::{models::Network, utils::parse_duration};

impl Network {
	/// Validates a single network entry
	///
	/// # Returns
	/// * `Ok(())` if the entry can be monitored
	/// * `Err(String)` describing the first violated rule
	pub fn validate(&self) -> Result<(), String> {
		// Validate name, it is used as the command argument
		if self.name.is_empty() || self.name.chars().any(char::is_whitespace) {
			return Err(format!(
				"Network name '{}' must be non-empty and contain no whitespace",
				self.name
			));
		}

		// Validate RPC URL format
		if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
			return Err(format!(
				"Network '{}': rpc_url must start with http:// or https://",
				self.name
			));
		}
		Url::parse(&self.rpc_url)
			.map_err(|e| format!("Network '{}': invalid rpc_url: {}", self.name, e))?;

		// Validate addresses and denom
		for (field, value) in [
			("contract_address", &self.contract_address),
			("relayer_address", &self.relayer_address),
			("denom", &self.denom),
			("query_symbol", &self.query_symbol),
		] {
			if value.trim().is_empty() {
				return Err(format!("Network '{}': {} is required", self.name, field));
			}
		}

		// Validate thresholds
		if self.threshold >= self.warning_threshold {
			return Err(format!(
				"Network '{}': threshold ({}) must be less than warning_threshold ({})",
				self.name, self.threshold, self.warning_threshold
			));
		}

		// Validate intervals
		for (field, value) in [
			("poll_interval", &self.poll_interval),
			("request_timeout", &self.request_timeout),
		] {
			let duration =
				parse_duration(value).map_err(|e| format!("Network '{}': {}", self.name, e))?;
			if duration.is_zero() {
				return Err(format!(
					"Network '{}': {} must be greater than zero",
					self.name, field
				));
			}
		}

		Ok(())
	}
}
