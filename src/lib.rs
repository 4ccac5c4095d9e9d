//! Relayer and oracle freshness monitor.
//!
//! Watches a set of independently configured networks. For every network a checker polls the
//! relayer account balance and the oracle contract's latest request identifiers, raising alerts
//! when the balance drops below its thresholds or an identifier stops advancing. Operators can
//! query the current state and temporarily suppress alerts through slash commands.
//!
//! # Modules
//! - `bootstrap`: wiring of checkers, the alert publisher and the command interface
//! - `models`: configuration and domain types
//! - `repositories`: access to the validated network configuration
//! - `services`: chain client, checkers, alert sink, notifications and commands
//! - `utils`: logging, metrics, parsing helpers and constants

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
