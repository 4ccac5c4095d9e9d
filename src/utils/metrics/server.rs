//! HTTP server module
//!
//! Serves Prometheus metrics for scraping, a liveness check and the Slack slash-command
//! endpoint that feeds the command interface.

use actix_web::middleware::{Compress, DefaultHeaders, NormalizePath};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use tracing::{error, info};

use crate::{
	services::command::{
		http::{slash_command_handler, SlashCommandState},
		CommandSender,
	},
	utils::metrics::gather_metrics,
};

/// Metrics endpoint handler
async fn metrics_handler() -> impl Responder {
	match gather_metrics() {
		Ok(buffer) => HttpResponse::Ok()
			.content_type("text/plain; version=0.0.4; charset=utf-8")
			.body(buffer),
		Err(e) => {
			error!("Error gathering metrics: {}", e);
			HttpResponse::InternalServerError().finish()
		}
	}
}

async fn health_handler() -> impl Responder {
	HttpResponse::Ok().body("ok")
}

/// Address actually bound; inside a container the server listens on every interface
fn resolve_bind_address(bind_address: &str, in_docker: bool) -> String {
	if !in_docker {
		return bind_address.to_string();
	}
	match bind_address.split(':').nth(1) {
		Some(port) => format!("0.0.0.0:{}", port),
		None => "0.0.0.0:8081".to_string(),
	}
}

/// Registers every route on an actix service config
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
	cfg.route("/metrics", web::get().to(metrics_handler))
		.route("/health", web::get().to(health_handler))
		.route("/slack/commands", web::post().to(slash_command_handler));
}

/// Creates the HTTP server
///
/// # Arguments
/// * `bind_address` - `host:port` to listen on
/// * `command_sender` - Handle of the running command interface
/// * `signing_secret` - Slack signing secret; when set, unsigned commands are rejected
pub fn create_server(
	bind_address: String,
	command_sender: CommandSender,
	signing_secret: Option<String>,
) -> std::io::Result<actix_web::dev::Server> {
	let in_docker = std::env::var("IN_DOCKER").unwrap_or_default() == "true";
	let actual_bind_address = resolve_bind_address(&bind_address, in_docker);

	info!(
		"Starting HTTP server on {} (actual bind: {})",
		bind_address, actual_bind_address
	);

	let state = web::Data::new(SlashCommandState {
		sender: command_sender,
		signing_secret,
	});

	Ok(HttpServer::new(move || {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.wrap(DefaultHeaders::new())
			.app_data(state.clone())
			.configure(configure_routes)
	})
	.workers(2)
	.bind(actual_bind_address)?
	.shutdown_timeout(5)
	.run())
}
