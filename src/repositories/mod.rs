//! Repository implementations.
//!
//! Repositories own loaded configuration and hand out copies to the services that need it.

mod error;
mod network;

pub use error::RepositoryError;
pub use network::{NetworkRepository, NetworkRepositoryTrait};
