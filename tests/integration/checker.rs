use std::{
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	},
	time::Duration,
};
use tokio::sync::{mpsc, watch};

use relayer_monitor::{
	models::{Alert, AlertKind, IdentifierKind, Network, Severity},
	services::{
		chain::ChainClientError,
		checker::{CheckerError, CheckerPhase, NetworkChecker},
	},
};

use crate::integration::mocks::{
	coins, create_test_network, create_test_sink, drain, scripted_client, GatedChainClient,
	MockChainClient,
};

fn create_checker(
	client: MockChainClient,
	network: Network,
) -> (Arc<NetworkChecker>, mpsc::Receiver<Alert>) {
	let (sink, receiver) = create_test_sink();
	let checker = NetworkChecker::new(network, Arc::new(client), sink).unwrap();
	(Arc::new(checker), receiver)
}

#[tokio::test]
async fn test_critical_balance_raises_one_alert() {
	let client = scripted_client("5000", vec![(IdentifierKind::Rate, vec![1])]);
	let (checker, mut receiver) = create_checker(client, create_test_network("juno"));

	let report = checker.tick().await;
	assert_eq!(report.emitted, 1);
	assert!(report.failures.is_empty());

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(alerts[0].kind(), AlertKind::LowBalance);
	assert_eq!(alerts[0].severity(), Severity::Critical);
	assert_eq!(alerts[0].field("Current balance"), Some("5000ujuno"));
	assert_eq!(checker.snapshot().await.balance, Some(5000));
}

#[tokio::test]
async fn test_balance_severity_bands() {
	for (balance, expected) in [
		("15000", Some(Severity::Warning)),
		("20000", Some(Severity::Warning)),
		("20001", None),
		("10000", Some(Severity::Critical)),
	] {
		let client = scripted_client(balance, vec![(IdentifierKind::Rate, vec![1])]);
		let (checker, mut receiver) = create_checker(client, create_test_network("juno"));

		checker.tick().await;
		let severities: Vec<Severity> = drain(&mut receiver)
			.iter()
			.map(|alert| alert.severity())
			.collect();
		assert_eq!(severities, expected.into_iter().collect::<Vec<_>>(), "{}", balance);
	}
}

#[tokio::test]
async fn test_missing_denom_counts_as_zero_balance() {
	let mut client = MockChainClient::new();
	client
		.expect_get_balances()
		.returning(|_, _| Ok(coins("uatom", "999999")));
	client.expect_get_request_id().returning(|_, _, _| Ok(1));
	let (checker, mut receiver) = create_checker(client, create_test_network("juno"));

	checker.tick().await;

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(alerts[0].severity(), Severity::Critical);
	assert_eq!(checker.snapshot().await.balance, Some(0));
}

#[tokio::test]
async fn test_repeated_rate_identifier_raises_stale_alert() {
	let mut client = MockChainClient::new();
	client
		.expect_get_balances()
		.times(2)
		.returning(|_, _| Ok(coins("ujuno", "50000")));
	client
		.expect_get_request_id()
		.withf(|_, _, payload| payload.kind() == IdentifierKind::Rate)
		.times(2)
		.returning(|_, _, _| Ok(100));
	let (checker, mut receiver) = create_checker(client, create_test_network("juno"));

	assert_eq!(checker.tick().await.emitted, 0);
	assert_eq!(checker.tick().await.emitted, 1);

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(
		alerts[0].kind(),
		AlertKind::StaleIdentifier(IdentifierKind::Rate)
	);
	assert_eq!(alerts[0].title(), ":exclamation: No New Request id");
	assert_eq!(alerts[0].field("Previous ID"), Some("100"));
	assert_eq!(alerts[0].field("Latest ID"), Some("100"));
}

#[tokio::test]
async fn test_advancing_identifiers_raise_nothing() {
	let mut network = create_test_network("juno");
	network.report_median = true;
	network.report_deviation = true;
	let client = scripted_client(
		"50000",
		vec![
			(IdentifierKind::Rate, vec![1, 2, 3]),
			(IdentifierKind::Median, vec![10, 11, 12]),
			(IdentifierKind::Deviation, vec![7, 8, 9]),
		],
	);
	let (checker, mut receiver) = create_checker(client, network);

	for _ in 0..3 {
		assert_eq!(checker.tick().await.emitted, 0);
	}
	assert!(drain(&mut receiver).is_empty());

	let ids = checker.snapshot().await.identifiers;
	assert_eq!((ids.rate, ids.median, ids.deviation), (3, 12, 9));
}

#[tokio::test]
async fn test_failed_fetch_does_not_block_other_kinds() {
	let mut network = create_test_network("juno");
	network.report_median = true;

	let rate_calls = Arc::new(AtomicUsize::new(0));
	let calls = rate_calls.clone();
	let mut client = MockChainClient::new();
	client.expect_get_balances().returning(|_, _| {
		Err(ChainClientError::Timeout {
			url: "https://rest.example.com".to_string(),
		})
	});
	client
		.expect_get_request_id()
		.withf(|_, _, payload| payload.kind() == IdentifierKind::Rate)
		.returning(move |_, _, _| {
			if calls.fetch_add(1, Ordering::SeqCst) == 0 {
				Ok(10)
			} else {
				Err(ChainClientError::HttpStatus {
					url: "https://rest.example.com".to_string(),
					status: 502,
				})
			}
		});
	client
		.expect_get_request_id()
		.withf(|_, _, payload| payload.kind() == IdentifierKind::Median)
		.returning(|_, _, _| Ok(5));
	let (checker, mut receiver) = create_checker(client, network);

	let first = checker.tick().await;
	assert_eq!(first.emitted, 0);
	assert_eq!(first.failures.len(), 1);
	assert!(matches!(first.failures[0], CheckerError::BalanceFetch { .. }));

	let second = checker.tick().await;
	assert_eq!(second.emitted, 1);
	assert_eq!(second.failures.len(), 2);
	assert!(second.failures.iter().any(|failure| matches!(
		failure,
		CheckerError::IdentifierFetch {
			kind: IdentifierKind::Rate,
			..
		}
	)));

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(
		alerts[0].kind(),
		AlertKind::StaleIdentifier(IdentifierKind::Median)
	);

	let snapshot = checker.snapshot().await;
	assert_eq!(snapshot.balance, None);
	assert_eq!(snapshot.identifiers.rate, 10);
	assert_eq!(snapshot.display_balance(), "unknown ujuno");
}

#[tokio::test(start_paused = true)]
async fn test_suppression_window_gates_alerts_not_state() {
	let client = scripted_client(
		"5000",
		vec![(IdentifierKind::Rate, vec![10, 20, 20, 15])],
	);
	let (checker, mut receiver) = create_checker(client, create_test_network("juno"));

	checker.set_suppression(Duration::from_secs(600)).await;
	assert!(checker.is_suppressed().await);

	// low balance and a baseline id, both suppressed
	let report = checker.tick().await;
	assert_eq!((report.emitted, report.suppressed), (0, 1));

	// the id keeps moving while suppressed
	checker.tick().await;
	let report = checker.tick().await;
	assert_eq!((report.emitted, report.suppressed), (0, 2));
	assert_eq!(checker.snapshot().await.identifiers.rate, 20);
	assert!(drain(&mut receiver).is_empty());

	tokio::time::advance(Duration::from_secs(601)).await;
	assert!(!checker.is_suppressed().await);

	let report = checker.tick().await;
	assert_eq!(report.emitted, 2);
	let alerts = drain(&mut receiver);
	let stale = alerts
		.iter()
		.find(|alert| alert.kind() == AlertKind::StaleIdentifier(IdentifierKind::Rate))
		.unwrap();
	assert_eq!(stale.field("Previous ID"), Some("20"));
	assert_eq!(stale.field("Latest ID"), Some("15"));
}

#[tokio::test]
async fn test_snapshot_does_not_mutate_state() {
	let client = scripted_client("50000", vec![(IdentifierKind::Rate, vec![7])]);
	let (checker, _receiver) = create_checker(client, create_test_network("juno"));
	checker.tick().await;

	let first = checker.snapshot().await;
	for _ in 0..10 {
		assert_eq!(checker.snapshot().await, first);
	}
	assert_eq!(first.relayer_address, "juno1relayer");
	assert_eq!(first.contract_address, "juno1contract");
	assert_eq!(first.identifiers.rate, 7);
}

#[tokio::test(start_paused = true)]
async fn test_run_ticks_every_interval_until_shutdown() {
	let ticks = Arc::new(AtomicUsize::new(0));
	let counter = ticks.clone();
	let mut client = MockChainClient::new();
	client.expect_get_balances().returning(move |_, _| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(coins("ujuno", "50000"))
	});
	client.expect_get_request_id().returning(|_, _, _| Ok(1));
	let (checker, _receiver) = create_checker(client, create_test_network("juno"));

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let handle = tokio::spawn(checker.clone().run(shutdown_rx));

	// ticks at 0s, 30s and 60s
	tokio::time::sleep(Duration::from_secs(65)).await;
	assert_eq!(checker.phase().await, CheckerPhase::Sleeping);

	shutdown_tx.send(true).unwrap();
	handle.await.unwrap();

	assert_eq!(ticks.load(Ordering::SeqCst), 3);
	assert_eq!(checker.phase().await, CheckerPhase::Cancelled);
}

#[tokio::test]
async fn test_run_exits_immediately_when_already_cancelled() {
	let mut client = MockChainClient::new();
	client.expect_get_balances().never();
	client.expect_get_request_id().never();
	let (checker, _receiver) = create_checker(client, create_test_network("juno"));

	let (_shutdown_tx, shutdown_rx) = watch::channel(true);
	checker.clone().run(shutdown_rx).await;

	assert_eq!(checker.phase().await, CheckerPhase::Cancelled);
}

#[test]
fn test_invalid_poll_interval_is_rejected() {
	let mut network = create_test_network("juno");
	network.poll_interval = "often".to_string();
	let (sink, _receiver) = create_test_sink();

	let result = NetworkChecker::new(network, Arc::new(MockChainClient::new()), sink);
	assert!(matches!(result, Err(CheckerError::InvalidConfig { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ticks_run_one_at_a_time() {
	let client = Arc::new(GatedChainClient::new(vec![50_000], Duration::from_millis(20)));
	client.release(8);
	let (sink, _receiver) = create_test_sink();
	let checker = Arc::new(
		NetworkChecker::new(create_test_network("juno"), client.clone(), sink).unwrap(),
	);

	let ticks: Vec<_> = (0..4)
		.map(|_| {
			let checker = checker.clone();
			tokio::spawn(async move { checker.tick().await })
		})
		.collect();
	for tick in ticks {
		let report = tick.await.unwrap();
		assert!(report.failures.is_empty());
	}

	assert_eq!(client.balance_calls(), 4);
	assert_eq!(client.max_in_flight(), 1);
}

#[tokio::test]
async fn test_snapshot_during_tick_returns_previous_state() {
	let client = Arc::new(GatedChainClient::new(vec![15_000, 5_000], Duration::ZERO));
	client.release(1);
	let (sink, mut receiver) = create_test_sink();
	let checker = Arc::new(
		NetworkChecker::new(create_test_network("juno"), client.clone(), sink).unwrap(),
	);

	checker.tick().await;
	let before = checker.snapshot().await;
	assert_eq!(before.balance, Some(15_000));
	assert_eq!(before.identifiers.rate, 1);
	drain(&mut receiver);

	let ticking = tokio::spawn({
		let checker = checker.clone();
		async move { checker.tick().await }
	});
	while client.balance_calls() < 2 {
		tokio::task::yield_now().await;
	}

	// second tick is parked inside the balance fetch
	assert_eq!(checker.phase().await, CheckerPhase::FetchingBalance);
	for _ in 0..3 {
		assert_eq!(checker.snapshot().await, before);
	}
	assert!(drain(&mut receiver).is_empty());

	client.release(1);
	let report = ticking.await.unwrap();
	assert_eq!(report.emitted, 1);

	let after = checker.snapshot().await;
	assert_eq!(after.balance, Some(5_000));
	assert_eq!(after.identifiers.rate, 2);
	assert_eq!(drain(&mut receiver)[0].severity(), Severity::Critical);
}
