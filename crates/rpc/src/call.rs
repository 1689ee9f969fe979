//! Outbound call descriptors seen by interceptors.

use std::collections::BTreeMap;

/// Method and metadata of an outbound call. Interceptors may edit metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundCall {
	method: Box<str>,
	metadata: BTreeMap<String, String>,
}

impl OutboundCall {
	/// Call to `method` with no metadata.
	pub fn new(method: impl Into<Box<str>>) -> Self {
		Self {
			method: method.into(),
			metadata: BTreeMap::new(),
		}
	}

	/// Fully qualified method path.
	pub fn method(&self) -> &str {
		&self.method
	}

	/// Metadata value for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.metadata.get(key).map(String::as_str)
	}

	/// Sets `key`, returning the previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.metadata.insert(key.into(), value.into())
	}

	/// Appends to a comma-separated value, creating it if missing.
	pub fn append(&mut self, key: impl Into<String>, value: &str) {
		let slot = self.metadata.entry(key.into()).or_default();
		if !slot.is_empty() {
			slot.push(',');
		}
		slot.push_str(value);
	}

	/// Removes `key`.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.metadata.remove(key)
	}

	/// All metadata, sorted by key.
	pub fn metadata(&self) -> &BTreeMap<String, String> {
		&self.metadata
	}
}

/// A call plus its request message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<M> {
	/// Call descriptor.
	pub call: OutboundCall,
	/// Request message.
	pub message: M,
}

impl<M> Request<M> {
	/// Request for `method` carrying `message`.
	pub fn new(method: impl Into<Box<str>>, message: M) -> Self {
		Self {
			call: OutboundCall::new(method),
			message,
		}
	}
}
