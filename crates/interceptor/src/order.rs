//! Order values shared by every ordering source.
//!
//! Lower values run earlier. The well-known constants leave gaps so custom
//! interceptors can slot in between them.

/// Runs before everything else.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Runs after everything else. Candidates without any hint resolve to this.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Named orders for the interceptor kinds most clients carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptorOrder {
	/// Absolute first slot.
	First,
	/// Translates failures into status codes before anything else sees them.
	GlobalExceptionHandling,
	/// Tracing and metrics spans.
	TracingMetrics,
	/// Maps security failures to statuses.
	SecurityExceptionHandling,
	/// Attaches credentials.
	SecurityAuthentication,
	/// Authorisation checks.
	SecurityAuthorisation,
	/// Absolute last slot.
	Last,
}

impl InterceptorOrder {
	/// All named orders, ascending.
	pub const ALL: [Self; 7] = [
		Self::First,
		Self::GlobalExceptionHandling,
		Self::TracingMetrics,
		Self::SecurityExceptionHandling,
		Self::SecurityAuthentication,
		Self::SecurityAuthorisation,
		Self::Last,
	];

	/// Numeric order value.
	pub const fn value(self) -> i32 {
		match self {
			Self::First => HIGHEST_PRECEDENCE,
			Self::GlobalExceptionHandling => 0,
			Self::TracingMetrics => 2500,
			Self::SecurityExceptionHandling => 5000,
			Self::SecurityAuthentication => 5100,
			Self::SecurityAuthorisation => 5200,
			Self::Last => LOWEST_PRECEDENCE,
		}
	}

	/// Name accepted in configuration files.
	pub const fn name(self) -> &'static str {
		match self {
			Self::First => "first",
			Self::GlobalExceptionHandling => "global_exception_handling",
			Self::TracingMetrics => "tracing_metrics",
			Self::SecurityExceptionHandling => "security_exception_handling",
			Self::SecurityAuthentication => "security_authentication",
			Self::SecurityAuthorisation => "security_authorisation",
			Self::Last => "last",
		}
	}

	/// Looks up a named order. Case-insensitive; `-` and `_` are interchangeable.
	pub fn from_name(name: &str) -> Option<Self> {
		let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
		Self::ALL.into_iter().find(|o| o.name() == normalized)
	}
}

impl core::fmt::Display for InterceptorOrder {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}({})", self.name(), self.value())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn named_orders_ascend() {
		let values: Vec<i32> = InterceptorOrder::ALL.iter().map(|o| o.value()).collect();
		let mut sorted = values.clone();
		sorted.sort_unstable();
		assert_eq!(values, sorted);
	}

	#[test]
	fn from_name_normalizes() {
		assert_eq!(
			InterceptorOrder::from_name("Tracing-Metrics"),
			Some(InterceptorOrder::TracingMetrics)
		);
		assert_eq!(InterceptorOrder::from_name(" last "), Some(InterceptorOrder::Last));
		assert_eq!(InterceptorOrder::from_name("middle"), None);
	}
}
