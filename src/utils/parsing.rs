//! Parsing utilities
//!
//! This module provides utilities for parsing human-readable durations in the
//! `1h30m` / `500ms` style used by the configuration file and the `set-timeout` command.

use std::time::Duration;
use winnow::{
	ascii::digit1,
	combinator::{alt, opt, repeat},
	ModalResult, Parser,
};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Parses a decimal number such as `10`, `1.5`, `5.` or `.5`
fn number(input: &mut &str) -> ModalResult<f64> {
	// At least one digit on either side of the point
	alt((
		(digit1, opt(('.', opt(digit1)))).take(),
		('.', digit1).take(),
	))
	.try_map(|digits: &str| digits.parse::<f64>())
	.parse_next(input)
}

/// Parses a unit suffix into its length in nanoseconds
fn unit(input: &mut &str) -> ModalResult<f64> {
	alt((
		"ns".value(1.0),
		"us".value(1_000.0),
		"µs".value(1_000.0),
		"ms".value(1_000_000.0),
		"s".value(NANOS_PER_SECOND),
		"m".value(60.0 * NANOS_PER_SECOND),
		"h".value(3_600.0 * NANOS_PER_SECOND),
	))
	.parse_next(input)
}

/// Parses one or more `<number><unit>` components and sums them in nanoseconds
fn duration_nanos(input: &mut &str) -> ModalResult<f64> {
	repeat(1.., (number, unit).map(|(value, unit)| value * unit))
		.fold(|| 0.0, |total, component| total + component)
		.parse_next(input)
}

/// Parses a duration string into a `Duration`.
///
/// Accepts one or more `<number><unit>` components where the unit is one of `ns`, `us`
/// (or `µs`), `ms`, `s`, `m` or `h`, e.g. "30s", "1m30s", "1.5h" or "250ms". A bare "0" is
/// accepted as a zero duration. Signs are rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
	let s = s.trim();
	if s == "0" {
		return Ok(Duration::ZERO);
	}

	let nanos = duration_nanos
		.parse(s)
		.map_err(|e| format!("Invalid duration format: '{}'. Error: {}", s, e))?;

	if !nanos.is_finite() || nanos >= u64::MAX as f64 {
		return Err(format!("Invalid duration format: '{}'. Error: overflow", s));
	}

	Ok(Duration::from_nanos(nanos.round() as u64))
}
