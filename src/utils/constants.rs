//! Constants shared across the application.

/// Symbol used in oracle queries when a network does not override it
pub const DEFAULT_QUERY_SYMBOL: &str = "ATOM";

/// Per-request timeout used when a network does not override it
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";

/// Default bind address of the HTTP server (commands, metrics, health)
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8081";

/// Default Slack Web API base URL
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Alert slots reserved per network in the alert sink: one balance alert plus one per
/// identifier kind
pub const ALERTS_PER_NETWORK: usize = 4;

/// How long a producer waits for room in a full alert sink before dropping the alert
pub const ALERT_ENQUEUE_TIMEOUT_SECS: u64 = 5;

/// Capacity of the inbound command queue
pub const COMMAND_QUEUE_CAPACITY: usize = 16;

/// Maximum accepted age of a signed slash-command request
pub const SLACK_SIGNATURE_MAX_AGE_SECS: i64 = 300;

// Alert titles and labels
pub const LOW_BALANCE_TITLE: &str = "Low Balance";
pub const BALANCE_TITLE: &str = "Balance";
pub const REQUEST_IDS_TITLE: &str = "Request IDS";
pub const TIMEOUT_TITLE: &str = "Notification timeout";
pub const ERROR_TITLE: &str = "An error has occurred:";
pub const RELAYER_LABEL: &str = "Relayer";
pub const ALERT_FOOTER: &str = "Monitor Bot";

/// How long the command endpoint waits for a command result before acknowledging anyway
pub const COMMAND_REPLY_WAIT_MILLIS: u64 = 2000;

/// Timeout of a single Slack API request
pub const SLACK_REQUEST_TIMEOUT_SECS: u64 = 10;
