//! Alert value objects.
//!
//! An [`Alert`] is built once by a producer (a checker or the command interface), pushed into
//! the alert sink and consumed exactly once by the publisher. It carries no reference back to
//! the producer and exposes no mutators after construction.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::IdentifierKind;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
	/// Informational replies to operator commands
	Info,
	Warning,
	Critical,
}

impl Severity {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Critical => "critical",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// What produced the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
	LowBalance,
	StaleIdentifier(IdentifierKind),
	CommandReply,
	CommandError,
}

impl AlertKind {
	/// Label used for metrics
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::LowBalance => "balance",
			Self::StaleIdentifier(kind) => kind.as_str(),
			Self::CommandReply => "command_reply",
			Self::CommandError => "command_error",
		}
	}
}

/// A titled value attached to an alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertField {
	pub title: String,
	pub value: String,
	/// Whether the field may be rendered side by side with other short fields
	pub short: bool,
}

impl AlertField {
	pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
		Self {
			title: title.into(),
			value: value.into(),
			short,
		}
	}
}

/// An outgoing notification
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
	kind: AlertKind,
	severity: Severity,
	title: String,
	pretext: Option<String>,
	text: Option<String>,
	fields: Vec<AlertField>,
	network: Option<String>,
	timestamp: DateTime<Utc>,
}

impl Alert {
	pub fn new(kind: AlertKind, severity: Severity, title: impl Into<String>) -> Self {
		Self {
			kind,
			severity,
			title: title.into(),
			pretext: None,
			text: None,
			fields: Vec::new(),
			network: None,
			timestamp: Utc::now(),
		}
	}

	pub fn with_pretext(mut self, pretext: impl Into<String>) -> Self {
		self.pretext = Some(pretext.into());
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn with_field(mut self, title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
		self.fields.push(AlertField::new(title, value, short));
		self
	}

	pub fn for_network(mut self, network: impl Into<String>) -> Self {
		self.network = Some(network.into());
		self
	}

	pub fn kind(&self) -> AlertKind {
		self.kind
	}

	pub fn severity(&self) -> Severity {
		self.severity
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn pretext(&self) -> Option<&str> {
		self.pretext.as_deref()
	}

	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	pub fn fields(&self) -> &[AlertField] {
		&self.fields
	}

	/// Looks up a field value by its title
	pub fn field(&self, title: &str) -> Option<&str> {
		self.fields
			.iter()
			.find(|field| field.title == title)
			.map(|field| field.value.as_str())
	}

	pub fn network(&self) -> Option<&str> {
		self.network.as_deref()
	}

	pub fn timestamp(&self) -> DateTime<Utc> {
		self.timestamp
	}
}
