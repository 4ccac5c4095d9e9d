//! Logging utilities for the application
//!
//! Checkers, the publisher and the command interface log through `tracing` with structured
//! fields (`network`, `kind`, `error`). The filter comes from `RUST_LOG` when it is set and
//! falls back to the level given on the command line, then to `info`. HTTP client and server
//! internals are capped at `warn` unless `RUST_LOG` names them explicitly.
use tracing_subscriber::{
	filter::{Directive, EnvFilter},
	fmt,
	prelude::*,
};

type LoggingError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crates whose debug output drowns the checker logs
const QUIET_TARGETS: [&str; 3] = ["hyper_util=warn", "reqwest=warn", "actix_server=warn"];

/// How the subscriber renders and filters events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
	/// Level used when `RUST_LOG` is unset
	pub default_level: String,
	/// Colored output, off when `NO_COLOR` is present
	pub ansi: bool,
}

impl Default for LogOptions {
	fn default() -> Self {
		Self {
			default_level: "info".to_string(),
			ansi: true,
		}
	}
}

impl LogOptions {
	/// Builds options from the `--log-level` flag and the process environment
	pub fn from_env(level: Option<&str>) -> Self {
		Self::from_lookup(level, |key| std::env::var(key).ok())
	}

	/// Same as [`LogOptions::from_env`] with an injectable variable lookup
	pub fn from_lookup<F>(level: Option<&str>, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		Self {
			default_level: level.unwrap_or("info").to_string(),
			ansi: lookup("NO_COLOR").is_none(),
		}
	}

	/// Filter from `RUST_LOG`, else from `default_level` with the quiet targets applied
	pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
		if let Ok(filter) = EnvFilter::try_from_default_env() {
			return Ok(filter);
		}

		let mut filter = EnvFilter::try_new(&self.default_level)?;
		for directive in QUIET_TARGETS {
			filter = filter.add_directive(directive.parse::<Directive>()?);
		}
		Ok(filter)
	}
}

/// Setup logging to stdout
pub fn setup_logging(options: &LogOptions) -> Result<(), LoggingError> {
	setup_logging_with_writer(options, std::io::stdout)
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(options: &LogOptions, writer: W) -> Result<(), LoggingError>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(options.filter()?)
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_ansi(options.ansi)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
