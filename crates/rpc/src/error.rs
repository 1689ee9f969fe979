//! Errors raised while running an interceptor chain.

use std::sync::Arc;

/// Reason an interceptor gives for refusing a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
	/// Rejection with the given reason.
	pub fn new(reason: impl Into<String>) -> Self {
		Self(reason.into())
	}
}

/// Failure of an outbound call inside the interceptor chain.
///
/// Services wrapped by a chain must convert this into their own error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
	/// An interceptor refused the call; later interceptors and the inner
	/// service were not invoked.
	#[error("call to {method} rejected by interceptor {interceptor:?}: {reason}")]
	Rejected {
		/// Method of the refused call.
		method: Box<str>,
		/// Name of the refusing interceptor.
		interceptor: Arc<str>,
		/// Reason given by the interceptor.
		#[source]
		reason: Rejection,
	},
}
