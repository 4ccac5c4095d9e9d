//! Network checker state machine.
//!
//! One tick walks `Idle -> FetchingBalance -> FetchingIdentifiers -> Evaluating ->
//! (Alerting) -> Sleeping`. Fetches happen without holding the state lock; evaluation and
//! every state mutation happen under it, and alerts are pushed after it is released.

use futures::future::join_all;
use std::{collections::BTreeSet, sync::Arc, time::Duration};
use tokio::{
	sync::{watch, Mutex},
	time::Instant,
};
use tracing::{debug, info, instrument, warn};

use crate::{
	models::{Alert, CheckerSnapshot, IdentifierKind, IdentifierSet, Network, QueryPayload, Severity},
	services::{
		alerting::AlertSink,
		chain::{parse_amount, ChainClient, ChainClientError},
		checker::CheckerError,
		notification::message,
	},
	utils::{
		metrics::{ALERTS_SUPPRESSED, FETCH_FAILURES, RELAYER_BALANCE, REQUEST_ID},
		parse_duration,
	},
};

/// Where a checker currently is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerPhase {
	Idle,
	FetchingBalance,
	FetchingIdentifiers,
	Evaluating,
	Alerting,
	Sleeping,
	/// Terminal; the loop observed shutdown and exited
	Cancelled,
}

/// Outcome of a single tick
#[derive(Debug, Default)]
pub struct TickReport {
	/// Alerts accepted by the sink
	pub emitted: usize,
	/// Alerts swallowed by the suppression window
	pub suppressed: usize,
	/// Alerts the sink refused
	pub dropped: usize,
	/// Fetches that failed; each one only affects its own half of the tick
	pub failures: Vec<CheckerError>,
	/// Shutdown was observed before the identifier fetches started
	pub cancelled: bool,
}

/// Severity of a balance, if it warrants an alert at all
pub fn classify_balance(amount: i64, threshold: i64, warning_threshold: i64) -> Option<Severity> {
	if amount <= threshold {
		Some(Severity::Critical)
	} else if amount <= warning_threshold {
		Some(Severity::Warning)
	} else {
		None
	}
}

/// An identifier is stale when it did not strictly advance
pub fn is_stale(previous: i64, latest: i64) -> bool {
	latest <= previous
}

#[derive(Debug)]
struct CheckerState {
	balance: Option<i64>,
	identifiers: IdentifierSet,
	/// Kinds observed at least once; the first observation only sets the baseline
	observed: BTreeSet<IdentifierKind>,
	suppressed_until: Option<Instant>,
	phase: CheckerPhase,
}

impl CheckerState {
	fn new() -> Self {
		Self {
			balance: None,
			identifiers: IdentifierSet::default(),
			observed: BTreeSet::new(),
			suppressed_until: None,
			phase: CheckerPhase::Idle,
		}
	}

	fn is_suppressed(&self, now: Instant) -> bool {
		self.suppressed_until.is_some_and(|until| now < until)
	}

	/// Stores `latest` unconditionally and returns the previous value if it is stale
	fn observe(&mut self, kind: IdentifierKind, latest: i64) -> Option<i64> {
		let first = self.observed.insert(kind);
		let previous = self.identifiers.get(kind);
		self.identifiers.set(kind, latest);

		if !first && is_stale(previous, latest) {
			Some(previous)
		} else {
			None
		}
	}
}

/// Monitors the relayer balance and oracle request ids of one network
pub struct NetworkChecker {
	network: Network,
	poll_interval: Duration,
	payloads: Vec<QueryPayload>,
	client: Arc<dyn ChainClient>,
	sink: AlertSink,
	/// Held for the whole tick so ticks never overlap
	tick_guard: Mutex<()>,
	state: Mutex<CheckerState>,
}

impl NetworkChecker {
	/// Creates a checker for `network`
	///
	/// # Arguments
	/// * `network` - Validated network configuration
	/// * `client` - Client used for every fetch
	/// * `sink` - Queue receiving the alerts this checker raises
	///
	/// # Returns
	/// * `Result<Self, CheckerError>` - Error if the poll interval does not parse
	pub fn new(
		network: Network,
		client: Arc<dyn ChainClient>,
		sink: AlertSink,
	) -> Result<Self, CheckerError> {
		let poll_interval =
			parse_duration(&network.poll_interval).map_err(|message| CheckerError::InvalidConfig {
				network: network.name.clone(),
				message,
			})?;

		Ok(Self {
			payloads: network.query_payloads(),
			network,
			poll_interval,
			client,
			sink,
			tick_guard: Mutex::new(()),
			state: Mutex::new(CheckerState::new()),
		})
	}

	pub fn name(&self) -> &str {
		&self.network.name
	}

	pub fn network(&self) -> &Network {
		&self.network
	}

	pub fn poll_interval(&self) -> Duration {
		self.poll_interval
	}

	pub async fn phase(&self) -> CheckerPhase {
		self.state.lock().await.phase
	}

	/// Copy of the last observed values; never mutates state
	pub async fn snapshot(&self) -> CheckerSnapshot {
		let state = self.state.lock().await;
		CheckerSnapshot {
			network: self.network.name.clone(),
			balance: state.balance,
			denom: self.network.denom.clone(),
			relayer_address: self.network.relayer_address.clone(),
			contract_address: self.network.contract_address.clone(),
			identifiers: state.identifiers,
		}
	}

	/// Swallows every alert of this checker until `now + duration`.
	///
	/// Alerts already queued are not affected.
	pub async fn set_suppression(&self, duration: Duration) {
		let until = Instant::now() + duration;
		self.state.lock().await.suppressed_until = Some(until);
		info!(
			network = %self.network.name,
			"Alerts suppressed for {:?}",
			duration
		);
	}

	pub async fn is_suppressed(&self) -> bool {
		self.state.lock().await.is_suppressed(Instant::now())
	}

	async fn set_phase(&self, phase: CheckerPhase) {
		self.state.lock().await.phase = phase;
	}

	/// Runs ticks until `shutdown` turns true or its sender is dropped.
	///
	/// Shutdown is observed before each external call; an in-flight fetch is never interrupted
	/// and is bounded by the client's request timeout.
	pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
		info!(
			network = %self.network.name,
			"Starting checker with poll interval {:?}",
			self.poll_interval
		);

		loop {
			if *shutdown.borrow() {
				break;
			}

			let report = self.tick_with(Some(&shutdown)).await;
			if report.cancelled {
				break;
			}

			self.set_phase(CheckerPhase::Sleeping).await;
			tokio::select! {
				_ = tokio::time::sleep(self.poll_interval) => {}
				changed = shutdown.changed() => {
					if changed.is_err() {
						break;
					}
				}
			}
		}

		self.set_phase(CheckerPhase::Cancelled).await;
		info!(network = %self.network.name, "Checker stopped");
	}

	/// Runs one fetch-evaluate cycle
	pub async fn tick(&self) -> TickReport {
		self.tick_with(None).await
	}

	#[instrument(skip_all, fields(network = %self.network.name))]
	async fn tick_with(&self, shutdown: Option<&watch::Receiver<bool>>) -> TickReport {
		let _guard = self.tick_guard.lock().await;
		let mut report = TickReport::default();

		self.set_phase(CheckerPhase::FetchingBalance).await;
		let balance = self.fetch_balance().await;

		let identifiers = if shutdown.is_some_and(|rx| *rx.borrow()) {
			debug!("Shutdown observed, skipping request id fetches");
			report.cancelled = true;
			Vec::new()
		} else {
			self.set_phase(CheckerPhase::FetchingIdentifiers).await;
			self.fetch_identifiers().await
		};

		let alerts = self.evaluate(balance, identifiers, &mut report).await;

		for alert in alerts {
			match self.sink.push(alert).await {
				Ok(()) => report.emitted += 1,
				Err(e) => {
					warn!(error = %e, "Alert was not enqueued");
					report.dropped += 1;
				}
			}
		}

		self.set_phase(CheckerPhase::Idle).await;
		report
	}

	async fn fetch_balance(&self) -> Result<i64, ChainClientError> {
		let balances = self
			.client
			.get_balances(&self.network.rpc_url, &self.network.relayer_address)
			.await?;

		// The bank module omits zero balances
		match balances.iter().find(|coin| coin.denom == self.network.denom) {
			Some(coin) => parse_amount(&coin.amount),
			None => Ok(0),
		}
	}

	/// Fetches every enabled kind concurrently, keeping each result separate
	async fn fetch_identifiers(&self) -> Vec<(IdentifierKind, Result<i64, ChainClientError>)> {
		let fetches = self.payloads.iter().map(|payload| async move {
			let result = self
				.client
				.get_request_id(
					&self.network.rpc_url,
					&self.network.contract_address,
					payload,
				)
				.await;
			(payload.kind(), result)
		});

		join_all(fetches).await
	}

	async fn evaluate(
		&self,
		balance: Result<i64, ChainClientError>,
		identifiers: Vec<(IdentifierKind, Result<i64, ChainClientError>)>,
		report: &mut TickReport,
	) -> Vec<Alert> {
		let name = self.network.name.as_str();
		let mut alerts = Vec::new();
		let mut state = self.state.lock().await;
		state.phase = CheckerPhase::Evaluating;
		let suppressed = state.is_suppressed(Instant::now());

		match balance {
			Ok(amount) => {
				state.balance = Some(amount);
				RELAYER_BALANCE.with_label_values(&[name]).set(amount as f64);

				if let Some(severity) = classify_balance(
					amount,
					self.network.threshold,
					self.network.warning_threshold,
				) {
					if suppressed {
						debug!(amount, "Low balance alert suppressed");
						ALERTS_SUPPRESSED.with_label_values(&[name, "balance"]).inc();
						report.suppressed += 1;
					} else {
						alerts.push(message::low_balance(&self.network, amount, severity));
					}
				}
			}
			Err(source) => {
				warn!(error = %source, "Failed to fetch relayer balance");
				FETCH_FAILURES.with_label_values(&[name, "balance"]).inc();
				report.failures.push(CheckerError::BalanceFetch {
					network: name.to_string(),
					source,
				});
			}
		}

		for (kind, result) in identifiers {
			match result {
				Ok(latest) => {
					REQUEST_ID
						.with_label_values(&[name, kind.as_str()])
						.set(latest as f64);

					if let Some(previous) = state.observe(kind, latest) {
						if suppressed {
							debug!(kind = %kind, previous, latest, "Stale request id alert suppressed");
							ALERTS_SUPPRESSED
								.with_label_values(&[name, kind.as_str()])
								.inc();
							report.suppressed += 1;
						} else {
							alerts.push(message::stale_identifier(
								&self.network,
								kind,
								previous,
								latest,
							));
						}
					}
				}
				Err(source) => {
					warn!(kind = %kind, error = %source, "Failed to fetch request id");
					FETCH_FAILURES
						.with_label_values(&[name, kind.as_str()])
						.inc();
					report.failures.push(CheckerError::IdentifierFetch {
						network: name.to_string(),
						kind,
						source,
					});
				}
			}
		}

		if !alerts.is_empty() {
			state.phase = CheckerPhase::Alerting;
		}
		alerts
	}
}
