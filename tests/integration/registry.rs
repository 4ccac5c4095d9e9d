use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::watch;

use relayer_monitor::{
	models::{AlertKind, IdentifierKind, Network},
	services::{
		chain::{ChainClient, ChainClientError},
		checker::{CheckerError, CheckerPhase, CheckerRegistry},
	},
};

use crate::integration::mocks::{
	create_test_network, create_test_sink, drain, scripted_client, MockChainClient,
};

fn factory_from(
	clients: HashMap<String, Arc<dyn ChainClient>>,
) -> impl Fn(&Network) -> Result<Arc<dyn ChainClient>, ChainClientError> + Send + Sync {
	move |network: &Network| {
		clients
			.get(&network.name)
			.cloned()
			.ok_or_else(|| ChainClientError::ClientBuildError(format!("no client for {}", network.name)))
	}
}

#[tokio::test]
async fn test_build_creates_one_checker_per_network() {
	let networks = vec![create_test_network("osmosis"), create_test_network("juno")];
	let mut clients: HashMap<String, Arc<dyn ChainClient>> = HashMap::new();
	for network in &networks {
		clients.insert(network.name.clone(), Arc::new(MockChainClient::new()));
	}
	let (sink, _receiver) = create_test_sink();

	let registry = CheckerRegistry::build(&networks, &sink, &factory_from(clients)).unwrap();

	assert_eq!(registry.len(), 2);
	assert_eq!(registry.names(), vec!["juno", "osmosis"]);
	assert_eq!(registry.get("juno").unwrap().name(), "juno");
}

#[tokio::test]
async fn test_unknown_network_is_a_named_error() {
	let networks = vec![create_test_network("juno")];
	let mut clients: HashMap<String, Arc<dyn ChainClient>> = HashMap::new();
	clients.insert("juno".to_string(), Arc::new(MockChainClient::new()));
	let (sink, _receiver) = create_test_sink();
	let registry = CheckerRegistry::build(&networks, &sink, &factory_from(clients)).unwrap();

	match registry.get("cosmoshub") {
		Err(CheckerError::NetworkNotFound(name)) => assert_eq!(name, "cosmoshub"),
		_ => panic!("expected NetworkNotFound"),
	}
}

#[test]
fn test_build_fails_when_client_cannot_be_created() {
	let networks = vec![create_test_network("juno")];
	let (sink, _receiver) = create_test_sink();

	let result = CheckerRegistry::build(&networks, &sink, &factory_from(HashMap::new()));
	assert!(matches!(
		result,
		Err(CheckerError::ClientError { network, .. }) if network == "juno"
	));
}

#[tokio::test(start_paused = true)]
async fn test_networks_are_isolated() {
	let networks = vec![create_test_network("juno"), create_test_network("osmosis")];

	let mut failing = MockChainClient::new();
	failing.expect_get_balances().returning(|_, _| {
		Err(ChainClientError::RequestError {
			url: "https://rest.example.com".to_string(),
			message: "connection refused".to_string(),
		})
	});
	failing.expect_get_request_id().returning(|_, _, _| {
		Err(ChainClientError::RequestError {
			url: "https://rest.example.com".to_string(),
			message: "connection refused".to_string(),
		})
	});

	let mut clients: HashMap<String, Arc<dyn ChainClient>> = HashMap::new();
	clients.insert("juno".to_string(), Arc::new(failing));
	clients.insert(
		"osmosis".to_string(),
		Arc::new(scripted_client("5000", vec![(IdentifierKind::Rate, vec![1, 2])])),
	);

	let (sink, mut receiver) = create_test_sink();
	let registry = CheckerRegistry::build(&networks, &sink, &factory_from(clients)).unwrap();

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let tasks = registry.spawn_all(&shutdown_rx);
	assert_eq!(tasks.len(), 2);

	tokio::time::sleep(Duration::from_secs(1)).await;
	shutdown_tx.send(true).unwrap();
	assert_eq!(tasks.join_all().await, 0);

	let alerts = drain(&mut receiver);
	assert_eq!(alerts.len(), 1);
	assert_eq!(alerts[0].kind(), AlertKind::LowBalance);
	assert_eq!(alerts[0].network(), Some("osmosis"));

	assert_eq!(
		registry.get("juno").unwrap().phase().await,
		CheckerPhase::Cancelled
	);
	assert_eq!(
		registry.get("osmosis").unwrap().snapshot().await.balance,
		Some(5000)
	);
}
