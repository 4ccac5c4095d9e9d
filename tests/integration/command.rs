use std::{sync::Arc, time::Duration};
use tokio::sync::{mpsc, watch};

use relayer_monitor::{
	models::{Alert, AlertKind, IdentifierKind, Network, Severity},
	services::{
		chain::{ChainClient, ChainClientError},
		checker::CheckerRegistry,
		command::{Command, CommandError, CommandHandler, CommandInterface},
	},
};

use crate::integration::mocks::{create_test_network, create_test_sink, drain, scripted_client};

fn create_handler(
	balance: &'static str,
	rate_ids: Vec<i64>,
) -> (CommandHandler, Arc<CheckerRegistry>, mpsc::Receiver<Alert>) {
	let (sink, receiver) = create_test_sink();
	let client: Arc<dyn ChainClient> =
		Arc::new(scripted_client(balance, vec![(IdentifierKind::Rate, rate_ids)]));
	let factory = move |_: &Network| -> Result<Arc<dyn ChainClient>, ChainClientError> {
		Ok(client.clone())
	};
	let registry = Arc::new(
		CheckerRegistry::build(&[create_test_network("juno")], &sink, &factory).unwrap(),
	);
	(
		CommandHandler::new(registry.clone(), sink),
		registry,
		receiver,
	)
}

#[tokio::test]
async fn test_get_balance_for_unknown_network_is_not_enqueued() {
	let (handler, _registry, mut receiver) = create_handler("50000", vec![1]);

	let result = handler.handle("", "get-balance unknownNetwork").await;

	assert_eq!(
		result,
		Err(CommandError::NotFound("unknownNetwork".to_string()))
	);
	assert!(drain(&mut receiver).is_empty());
}

#[tokio::test]
async fn test_get_balance_replies_with_last_observation() {
	let (handler, registry, mut receiver) = create_handler("50000", vec![1]);
	registry.get("juno").unwrap().tick().await;

	handler.handle("/balance", "juno").await.unwrap();

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(alerts[0].kind(), AlertKind::CommandReply);
	assert_eq!(alerts[0].severity(), Severity::Info);
	assert_eq!(alerts[0].title(), "Balance");
	assert_eq!(alerts[0].field("Current balance"), Some("50000ujuno"));
	assert_eq!(alerts[0].field("Relayer Address"), Some("juno1relayer"));
}

#[tokio::test]
async fn test_get_ids_replies_with_all_identifiers() {
	let (handler, registry, mut receiver) = create_handler("50000", vec![42]);
	registry.get("juno").unwrap().tick().await;

	handler.handle("", "get-ids juno").await.unwrap();

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(alerts[0].title(), "Request IDS");
	assert_eq!(alerts[0].field("Current Request ID"), Some("42"));
	assert_eq!(alerts[0].field("Current Median ID"), Some("0"));
	assert_eq!(alerts[0].field("Current Deviation ID"), Some("0"));
}

#[tokio::test]
async fn test_execute_builds_reply_without_enqueuing() {
	let (handler, _registry, mut receiver) = create_handler("50000", vec![1]);

	let reply = handler
		.execute(&Command::GetBalance {
			network: "juno".to_string(),
		})
		.await
		.unwrap();

	assert_eq!(reply.field("Current balance"), Some("unknown ujuno"));
	assert!(drain(&mut receiver).is_empty());
}

#[tokio::test]
async fn test_invalid_commands_reply_with_error_alert() {
	let (handler, _registry, mut receiver) = create_handler("50000", vec![1]);

	let result = handler.handle("", "set-timeout juno soon").await;
	assert!(matches!(result, Err(CommandError::InvalidArgument { .. })));

	let result = handler.handle("", "reboot juno").await;
	assert_eq!(result, Err(CommandError::UnknownVerb("reboot".to_string())));

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 2);
	assert!(alerts
		.iter()
		.all(|alert| alert.kind() == AlertKind::CommandError));
	assert_eq!(alerts[0].title(), "An error has occurred:");
	assert!(alerts[0]
		.text()
		.unwrap()
		.starts_with("command error: invalid argument 'soon'"));
	assert_eq!(alerts[1].text(), Some("command error: unknown command 'reboot'"));
}

#[tokio::test(start_paused = true)]
async fn test_set_timeout_suppresses_stale_alerts_for_its_window() {
	let (handler, registry, mut receiver) = create_handler("50000", vec![10]);
	let checker = registry.get("juno").unwrap();
	checker.tick().await;

	handler.handle("", "set-timeout juno 10m").await.unwrap();
	let ack = drain(&mut receiver);
	assert_eq!(ack.len(), 1);
	assert_eq!(ack[0].title(), "Notification timeout");
	assert_eq!(
		ack[0].text(),
		Some("notification timeout on network juno for 10m")
	);

	tokio::time::advance(Duration::from_secs(5 * 60)).await;
	let report = checker.tick().await;
	assert_eq!((report.emitted, report.suppressed), (0, 1));
	assert!(drain(&mut receiver).is_empty());

	tokio::time::advance(Duration::from_secs(6 * 60)).await;
	let report = checker.tick().await;
	assert_eq!(report.emitted, 1);

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(
		alerts[0].kind(),
		AlertKind::StaleIdentifier(IdentifierKind::Rate)
	);
}

#[tokio::test]
async fn test_command_interface_serves_until_shutdown() {
	let (handler, _registry, mut receiver) = create_handler("50000", vec![1]);
	let (interface, sender) = CommandInterface::new(handler);
	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let task = tokio::spawn(interface.run(shutdown_rx));

	sender.submit("/relayerstatus", "juno").await.unwrap();
	assert_eq!(
		sender.submit("/balance", "osmosis").await,
		Err(CommandError::NotFound("osmosis".to_string()))
	);

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(alerts[0].title(), "Request IDS");

	shutdown_tx.send(true).unwrap();
	task.await.unwrap();

	assert_eq!(
		sender.submit("/balance", "juno").await,
		Err(CommandError::Unavailable)
	);
}
