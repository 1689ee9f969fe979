//! Per-client interceptor chains.
//!
//! A client runs the global interceptors first, then its own extras in the
//! order they were registered. With `sort_interceptors` the combined list is
//! resolved again, so extras can slot in between globals.
//!
//! A chain is a snapshot: republishing the global registry only affects chains
//! built afterwards.

use std::sync::Arc;
use std::task::{Context, Poll};

use ordo_interceptor::{Candidate, Collector, ResolveError, resolve};
use tower_layer::Layer;
use tower_service::Service;

use crate::call::Request;
use crate::error::CallError;
use crate::interceptor::{ClientInterceptor, CollectorExt, GlobalInterceptors, InterceptorChain};
use crate::layer::{InterceptFuture, run_interceptor};

struct Link {
	name: Arc<str>,
	interceptor: Arc<dyn ClientInterceptor>,
}

impl From<&Candidate<dyn ClientInterceptor>> for Link {
	fn from(candidate: &Candidate<dyn ClientInterceptor>) -> Self {
		Self {
			name: Arc::from(candidate.name()),
			interceptor: Arc::clone(candidate.interceptor()),
		}
	}
}

/// Interceptors applied to one client, in execution order.
#[derive(Clone)]
pub struct ClientChain {
	links: Arc<[Link]>,
}

impl core::fmt::Debug for ClientChain {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

impl ClientChain {
	/// Chain of just the currently published global interceptors.
	pub fn from_registry(global: &GlobalInterceptors) -> Self {
		Self::from_resolved(&global.list())
	}

	/// Chain running `chain` as is.
	pub fn from_resolved(chain: &InterceptorChain) -> Self {
		Self {
			links: chain.iter().map(Link::from).collect(),
		}
	}

	/// Builder starting from the currently published global interceptors.
	pub fn builder(global: &GlobalInterceptors) -> ClientChainBuilder {
		ClientChainBuilder {
			global: global.list(),
			extras: Collector::new(),
			sort: false,
		}
	}

	/// Number of interceptors.
	pub fn len(&self) -> usize {
		self.links.len()
	}

	/// True when no interceptor runs.
	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	/// Interceptor names in execution order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.links.iter().map(|l| &*l.name)
	}

	/// Wraps `service` so every call passes through the chain first.
	pub fn wrap<S>(&self, service: S) -> ChainService<S> {
		self.layer(service)
	}
}

impl<S> Layer<S> for ClientChain {
	type Service = ChainService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		ChainService {
			inner,
			links: Arc::clone(&self.links),
		}
	}
}

/// Collects per-client interceptors on top of the global ones.
pub struct ClientChainBuilder {
	global: InterceptorChain,
	extras: Collector<dyn ClientInterceptor>,
	sort: bool,
}

impl ClientChainBuilder {
	/// Adds a client-specific interceptor.
	#[must_use]
	pub fn interceptor(mut self, name: &str, interceptor: Arc<dyn ClientInterceptor>) -> Self {
		self.extras.register_interceptor(name, interceptor);
		self
	}

	/// Adds client-specific interceptors from a collector, keeping its order
	/// and hints.
	#[must_use]
	pub fn extras(mut self, collector: Collector<dyn ClientInterceptor>) -> Self {
		self.extras.extend(collector.into_candidates());
		self
	}

	/// Resolves globals and extras together instead of appending extras.
	#[must_use]
	pub fn sort_interceptors(mut self, sort: bool) -> Self {
		self.sort = sort;
		self
	}

	/// Builds the chain. Only fails when sorting hits a malformed hint.
	pub fn build(self) -> Result<ClientChain, ResolveError> {
		let combined: Vec<Candidate<dyn ClientInterceptor>> = self
			.global
			.iter()
			.cloned()
			.chain(self.extras.into_candidates())
			.collect();

		let links: Arc<[Link]> = if self.sort {
			resolve(&combined)?.iter().map(Link::from).collect()
		} else {
			combined.iter().map(Link::from).collect()
		};
		Ok(ClientChain { links })
	}
}

/// Service running a [`ClientChain`] before the inner service.
#[derive(Clone)]
pub struct ChainService<S> {
	inner: S,
	links: Arc<[Link]>,
}

impl<S, M> Service<Request<M>> for ChainService<S>
where
	S: Service<Request<M>>,
	S::Error: From<CallError>,
{
	type Response = S::Response;
	type Error = S::Error;
	type Future = InterceptFuture<S::Future, S::Error>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, mut req: Request<M>) -> Self::Future {
		for link in self.links.iter() {
			if let Err(err) = run_interceptor(&link.name, link.interceptor.as_ref(), &mut req.call) {
				return InterceptFuture::rejected(err.into());
			}
		}
		InterceptFuture::forward(self.inner.call(req))
	}
}
