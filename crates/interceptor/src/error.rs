//! Error types for hint parsing, resolution, and configuration loading.

use std::path::PathBuf;

use crate::candidate::{HintKind, OrderHint};

/// Why a present hint could not be turned into an order value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HintError {
	/// Neither a decimal literal nor a named order.
	#[error("not a number or named order: {value:?}")]
	NotNumeric {
		/// Offending text.
		value: Box<str>,
	},
	/// Integer outside the 32-bit order range.
	#[error("{value} is outside the order range [{min}, {max}]", min = i32::MIN, max = i32::MAX)]
	OutOfRange {
		/// Offending value.
		value: i64,
	},
	/// Digit string too long for any integer type.
	#[error("{value} is outside the order range [{min}, {max}]", min = i32::MIN, max = i32::MAX)]
	Overflow {
		/// Offending text.
		value: Box<str>,
	},
}

/// Resolution failure. Nothing is published when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	/// A hint is present but malformed.
	#[error("interceptor {name:?} has a malformed {kind} hint {value}: {reason}")]
	MalformedHint {
		/// Candidate name.
		name: Box<str>,
		/// Source of the bad hint.
		kind: HintKind,
		/// The hint as given.
		value: OrderHint,
		/// Parse failure.
		#[source]
		reason: HintError,
	},
}

/// Failure to load an [`OrderingConfig`](crate::OrderingConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The file could not be read.
	#[error("failed to read {path}: {source}")]
	Read {
		/// File that was requested.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},
	/// The TOML was invalid or had the wrong shape.
	#[error("failed to parse ordering config: {0}")]
	Parse(#[from] toml::de::Error),
}
