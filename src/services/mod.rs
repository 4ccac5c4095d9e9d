//! Core services of the monitor.
//!
//! - `chain`: balance and request id queries against a network's REST endpoint
//! - `checker`: per-network checkers, their registry and task group
//! - `alerting`: the bounded alert sink and the publisher draining it
//! - `notification`: alert formatting and Slack delivery
//! - `command`: operator commands and the slash-command endpoint

pub mod alerting;
pub mod chain;
pub mod checker;
pub mod command;
pub mod notification;
