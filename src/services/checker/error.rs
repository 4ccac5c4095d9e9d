//! Checker error types.

use thiserror::Error;

use crate::{models::IdentifierKind, services::chain::ChainClientError};

/// Errors raised by checkers and the registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckerError {
	#[error("network '{0}' not found")]
	NetworkNotFound(String),

	#[error("invalid configuration for network '{network}': {message}")]
	InvalidConfig { network: String, message: String },

	#[error("failed to create chain client for network '{network}': {source}")]
	ClientError {
		network: String,
		#[source]
		source: ChainClientError,
	},

	#[error("failed to fetch balance on network '{network}': {source}")]
	BalanceFetch {
		network: String,
		#[source]
		source: ChainClientError,
	},

	#[error("failed to fetch {kind} request id on network '{network}': {source}")]
	IdentifierFetch {
		network: String,
		kind: IdentifierKind,
		#[source]
		source: ChainClientError,
	},
}
