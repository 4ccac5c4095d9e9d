//! Cosmos SDK REST client.
//!
//! Balances come from the bank module and request ids from a CosmWasm smart query:
//! - `GET {rpc}/cosmos/bank/v1beta1/balances/{address}`
//! - `GET {rpc}/cosmwasm/wasm/v1/contract/{contract}/smart/{base64 query}`
//!
//! Every request is bounded by the network's request timeout. Failed requests are not
//! retried here; the checker simply tries again on its next tick.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

use crate::{
	models::{Network, QueryPayload},
	services::chain::{parse_amount, ChainClient, ChainClientError, Coin},
	utils::parse_duration,
};

#[derive(Debug, Deserialize)]
struct BalancesResponse {
	balances: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
struct SmartQueryResponse {
	data: RequestIdData,
}

#[derive(Debug, Deserialize)]
struct RequestIdData {
	request_id: String,
}

/// HTTP client for Cosmos SDK REST endpoints
#[derive(Debug, Clone)]
pub struct CosmwasmClient {
	client: Client,
}

impl CosmwasmClient {
	/// Creates a client whose requests time out after `timeout`
	pub fn new(timeout: Duration) -> Result<Self, ChainClientError> {
		let client = Client::builder()
			.timeout(timeout)
			.connect_timeout(timeout.min(Duration::from_secs(10)))
			.pool_max_idle_per_host(2)
			.build()
			.map_err(|e| ChainClientError::ClientBuildError(e.to_string()))?;
		Ok(Self { client })
	}

	/// Creates a client using the network's configured request timeout
	pub fn for_network(network: &Network) -> Result<Self, ChainClientError> {
		let timeout = parse_duration(&network.request_timeout)
			.map_err(ChainClientError::ClientBuildError)?;
		Self::new(timeout)
	}

	fn balances_url(rpc_url: &str, address: &str) -> String {
		format!(
			"{}/cosmos/bank/v1beta1/balances/{}",
			rpc_url.trim_end_matches('/'),
			address
		)
	}

	fn smart_query_url(rpc_url: &str, contract_address: &str, payload: &QueryPayload) -> String {
		format!(
			"{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
			rpc_url.trim_end_matches('/'),
			contract_address,
			payload.encoded()
		)
	}

	async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ChainClientError> {
		let response = self.client.get(url).send().await.map_err(|e| {
			if e.is_timeout() {
				ChainClientError::Timeout {
					url: url.to_string(),
				}
			} else {
				ChainClientError::RequestError {
					url: url.to_string(),
					message: e.to_string(),
				}
			}
		})?;

		let status = response.status();
		if !status.is_success() {
			return Err(ChainClientError::HttpStatus {
				url: url.to_string(),
				status: status.as_u16(),
			});
		}

		let body = response
			.text()
			.await
			.map_err(|e| ChainClientError::RequestError {
				url: url.to_string(),
				message: e.to_string(),
			})?;

		serde_json::from_str(&body).map_err(|e| ChainClientError::ResponseParseError {
			url: url.to_string(),
			message: e.to_string(),
		})
	}
}

#[async_trait]
impl ChainClient for CosmwasmClient {
	async fn get_balances(
		&self,
		rpc_url: &str,
		address: &str,
	) -> Result<Vec<Coin>, ChainClientError> {
		let url = Self::balances_url(rpc_url, address);
		let response: BalancesResponse = self.get_json(&url).await?;
		Ok(response.balances)
	}

	async fn get_request_id(
		&self,
		rpc_url: &str,
		contract_address: &str,
		payload: &QueryPayload,
	) -> Result<i64, ChainClientError> {
		let url = Self::smart_query_url(rpc_url, contract_address, payload);
		let response: SmartQueryResponse = self.get_json(&url).await?;
		parse_amount(&response.data.request_id)
	}
}
