//! Chain query clients.
//!
//! A [`ChainClient`] answers the two questions a checker asks on every tick: what does the
//! relayer hold, and what is the latest request id the oracle contract reports for a given
//! query. [`CosmwasmClient`] implements it over the Cosmos SDK REST (LCD) API.

mod client;
mod cosmwasm;
mod error;

pub use client::{parse_amount, ChainClient, Coin};
pub use cosmwasm::CosmwasmClient;
pub use error::ChainClientError;
