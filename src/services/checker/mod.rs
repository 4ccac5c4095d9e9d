//! Per-network checkers.
//!
//! A [`NetworkChecker`] owns everything known about one network and polls it on its own task.
//! The [`CheckerRegistry`] builds one checker per configured network and is the only way the
//! command interface reaches them.

mod error;
mod network_checker;
mod registry;
mod tasks;

pub use error::CheckerError;
pub use network_checker::{classify_balance, is_stale, CheckerPhase, NetworkChecker, TickReport};
pub use registry::{ChainClientFactory, CheckerRegistry};
pub use tasks::CheckerTasks;
