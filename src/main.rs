//! Relayer monitor entry point.
//!
//! Loads the network configuration, starts one checker per network together with the alert
//! publisher and the command interface, serves metrics and slash commands over HTTP, and shuts
//! everything down in order on Ctrl+C or SIGTERM.
//!
//! # Flow
//! 1. Parses the CLI and loads `.env`
//! 2. Loads and validates the configuration file, exiting non-zero on any error
//! 3. Reads Slack settings from the environment
//! 4. Starts the services and the HTTP server
//! 5. Waits for a shutdown signal, then stops the server and the services

use clap::{Arg, Command};
use dotenvy::dotenv;
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};

use relayer_monitor::{
	bootstrap::{cosmwasm_client_factory, start_services, SlackSettings},
	repositories::{NetworkRepository, NetworkRepositoryTrait},
	utils::{
		constants::DEFAULT_SERVER_ADDRESS,
		logging::{setup_logging, LogOptions},
		metrics::server::create_server,
	},
};

/// Resolves once the process is asked to stop
async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			error!("Error waiting for Ctrl+C: {}", e);
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(e) => {
				error!("Error installing SIGTERM handler: {}", e);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {}
		_ = terminate => {}
	}
}

/// Main entry point for the relayer monitor.
///
/// # Errors
/// Returns an error if configuration loading or service startup fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("relayer-monitor")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Watches relayer balances and oracle request ids across networks and raises Slack \
			 alerts when a balance runs low or an id stops advancing.",
		)
		.arg(
			Arg::new("config")
				.help("Path to the JSON configuration file")
				.value_name("CONFIG")
				.required(true),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("server-address")
				.long("server-address")
				.help("Address of the HTTP server for metrics and slash commands")
				.value_name("HOST:PORT")
				.env("SERVER_ADDRESS")
				.default_value(DEFAULT_SERVER_ADDRESS),
		)
		.get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	// RUST_LOG, when set, takes precedence over --log-level
	let log_options =
		LogOptions::from_env(matches.get_one::<String>("log-level").map(String::as_str));
	setup_logging(&log_options).unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config_path = matches
		.get_one::<String>("config")
		.map(PathBuf::from)
		.ok_or_else(|| anyhow::anyhow!("configuration path is required"))?;
	let server_address = matches
		.get_one::<String>("server-address")
		.cloned()
		.unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

	let repository = NetworkRepository::new(&config_path).map_err(|e| {
		anyhow::anyhow!(
			"Failed to load configuration from {}: {}",
			config_path.display(),
			e
		)
	})?;
	let networks = repository.get_all();

	let slack = SlackSettings::from_env()
		.map_err(|e| anyhow::anyhow!("Failed to read Slack settings: {}", e))?;
	let notifier = Arc::new(
		slack
			.notifier()
			.map_err(|e| anyhow::anyhow!("Failed to create Slack notifier: {}", e))?,
	);

	let services = start_services(networks.values(), notifier, &cosmwasm_client_factory)
		.map_err(|e| anyhow::anyhow!("Failed to start services: {}", e))?;

	let server = create_server(
		server_address,
		services.command_sender(),
		slack.signing_secret.clone(),
	)?;
	let server_handle = server.handle();
	let server_task = tokio::spawn(server);

	info!("Service started. Press Ctrl+C to shutdown");
	shutdown_signal().await;
	info!("Shutdown signal received, stopping services...");

	server_handle.stop(true).await;
	match server_task.await {
		Ok(Err(e)) => error!("HTTP server error: {}", e),
		Err(e) => error!("HTTP server task failed: {}", e),
		Ok(Ok(())) => {}
	}

	let stats = services.shutdown().await;
	info!(
		delivered = stats.delivered,
		failed = stats.failed,
		"Shutdown complete"
	);
	Ok(())
}
