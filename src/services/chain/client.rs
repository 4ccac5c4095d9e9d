use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{models::QueryPayload, services::chain::ChainClientError};

/// A token amount held by an account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coin {
	pub denom: String,
	/// Base-10 integer string
	pub amount: String,
}

/// Queries a network on behalf of a checker
#[async_trait]
pub trait ChainClient: Send + Sync {
	/// Returns every balance held by `address`, in the order the endpoint reports them
	async fn get_balances(
		&self,
		rpc_url: &str,
		address: &str,
	) -> Result<Vec<Coin>, ChainClientError>;

	/// Returns the latest request id reported by `contract_address` for `payload`
	async fn get_request_id(
		&self,
		rpc_url: &str,
		contract_address: &str,
		payload: &QueryPayload,
	) -> Result<i64, ChainClientError>;
}

/// Parses a base-10 integer string as returned by the chain
pub fn parse_amount(value: &str) -> Result<i64, ChainClientError> {
	value
		.trim()
		.parse::<i64>()
		.map_err(|e| ChainClientError::InvalidNumber {
			value: value.to_string(),
			message: e.to_string(),
		})
}
