//! Ordering overrides loaded from TOML.
//!
//! ```toml
//! [interceptors.auth]
//! order = 5100
//!
//! [interceptors.metrics]
//! priority = "tracing_metrics"
//! ```
//!
//! Values are kept raw. Range and text problems surface when the chain is
//! resolved, naming the interceptor they belong to.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::candidate::OrderHint;
use crate::error::ConfigError;

/// Ordering overrides keyed by interceptor name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderingConfig {
	/// Per-interceptor hints.
	#[serde(default)]
	pub interceptors: BTreeMap<String, HintConfig>,
}

/// Hints configured for one interceptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HintConfig {
	/// Explicit order override.
	pub order: Option<HintValue>,
	/// Priority override.
	pub priority: Option<HintValue>,
}

/// A hint as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HintValue {
	/// Integer literal.
	Integer(i64),
	/// Decimal text or named order.
	Text(String),
}

impl HintValue {
	/// Converts into an unparsed hint.
	pub fn to_hint(&self) -> OrderHint {
		match self {
			Self::Integer(v) => OrderHint::Integer(*v),
			Self::Text(text) => OrderHint::Text(Box::from(text.as_str())),
		}
	}
}

impl OrderingConfig {
	/// Parses a config from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a config file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&text)?;
		tracing::debug!(
			path = %path.display(),
			entries = config.interceptors.len(),
			"loaded interceptor ordering config"
		);
		Ok(config)
	}

	/// True when no overrides are configured.
	pub fn is_empty(&self) -> bool {
		self.interceptors.is_empty()
	}
}
