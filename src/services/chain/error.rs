//! Chain client error types.

use thiserror::Error;

/// Errors raised while querying a network
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainClientError {
	#[error("Failed to build HTTP client: {0}")]
	ClientBuildError(String),

	#[error("Request to {url} failed: {message}")]
	RequestError { url: String, message: String },

	#[error("Request to {url} timed out")]
	Timeout { url: String },

	#[error("Unexpected status {status} from {url}")]
	HttpStatus { url: String, status: u16 },

	#[error("Malformed response from {url}: {message}")]
	ResponseParseError { url: String, message: String },

	#[error("Invalid integer value '{value}': {message}")]
	InvalidNumber { value: String, message: String },
}
