//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines specific metrics for the application.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, GaugeVec, IntCounter, Opts, Registry, TextEncoder};

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Gauge for the last observed relayer balance per network.
	pub static ref RELAYER_BALANCE: GaugeVec = {
		let gauge = GaugeVec::new(
			Opts::new("relayer_balance", "Last observed relayer balance in base denom units"),
			&["network"],
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Gauge for the last observed request id per network and identifier kind.
	pub static ref REQUEST_ID: GaugeVec = {
		let gauge = GaugeVec::new(
			Opts::new("request_id", "Last observed oracle request id"),
			&["network", "kind"],
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Counter for alerts pushed into the alert sink.
	pub static ref ALERTS_EMITTED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("alerts_emitted_total", "Alerts pushed to the notification queue"),
			&["network", "kind"],
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter for alerts swallowed by a suppression window.
	pub static ref ALERTS_SUPPRESSED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("alerts_suppressed_total", "Alerts swallowed by a suppression window"),
			&["network", "kind"],
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter for failed balance or identifier fetches.
	pub static ref FETCH_FAILURES: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("fetch_failures_total", "Failed balance or request id fetches"),
			&["network", "kind"],
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter for notifications delivered.
	pub static ref NOTIFICATIONS_SENT: IntCounter = {
		let counter = IntCounter::new("notifications_sent_total", "Notifications delivered").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter for notifications the delivery channel rejected.
	pub static ref NOTIFICATIONS_FAILED: IntCounter = {
		let counter = IntCounter::new("notifications_failed_total", "Notifications that failed delivery").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}
