//! The client interceptor trait and its registration helpers.

use std::sync::Arc;

use ordo_interceptor::{CandidateEntry, Collector, InterceptorRegistry, ResolvedChain};

use crate::call::OutboundCall;
use crate::error::Rejection;

/// Cross-cutting logic invoked before an outbound call leaves the client.
pub trait ClientInterceptor: Send + Sync + 'static {
	/// Inspects or edits the call. An error stops the call.
	fn intercept(&self, call: &mut OutboundCall) -> Result<(), Rejection>;

	/// Order reported by the interceptor itself.
	///
	/// Used only when the registration carries neither an explicit order nor a
	/// priority.
	fn order(&self) -> Option<i32> {
		None
	}
}

/// Registry of the interceptors applied to every client.
pub type GlobalInterceptors = InterceptorRegistry<dyn ClientInterceptor>;

/// Resolved chain of client interceptors.
pub type InterceptorChain = ResolvedChain<dyn ClientInterceptor>;

/// Registration helpers for collectors of client interceptors.
pub trait CollectorExt {
	/// Registers `interceptor`, recording [`ClientInterceptor::order`] as its
	/// capability order when it reports one.
	fn register_interceptor(
		&mut self,
		name: impl Into<Box<str>>,
		interceptor: Arc<dyn ClientInterceptor>,
	) -> CandidateEntry<'_, dyn ClientInterceptor>;
}

impl CollectorExt for Collector<dyn ClientInterceptor> {
	fn register_interceptor(
		&mut self,
		name: impl Into<Box<str>>,
		interceptor: Arc<dyn ClientInterceptor>,
	) -> CandidateEntry<'_, dyn ClientInterceptor> {
		let order = interceptor.order();
		let entry = self.register(name, interceptor);
		match order {
			Some(order) => entry.capability_order(order),
			None => entry,
		}
	}
}

/// Interceptor backed by a closure.
pub struct FnInterceptor<F> {
	f: F,
	order: Option<i32>,
}

/// Wraps a closure as a [`ClientInterceptor`].
pub fn interceptor_fn<F>(f: F) -> FnInterceptor<F>
where
	F: Fn(&mut OutboundCall) -> Result<(), Rejection> + Send + Sync + 'static,
{
	FnInterceptor { f, order: None }
}

impl<F> FnInterceptor<F> {
	/// Reports `order` through [`ClientInterceptor::order`].
	#[must_use]
	pub fn with_order(mut self, order: i32) -> Self {
		self.order = Some(order);
		self
	}
}

impl<F> ClientInterceptor for FnInterceptor<F>
where
	F: Fn(&mut OutboundCall) -> Result<(), Rejection> + Send + Sync + 'static,
{
	fn intercept(&self, call: &mut OutboundCall) -> Result<(), Rejection> {
		(self.f)(call)
	}

	fn order(&self) -> Option<i32> {
		self.order
	}
}
