//! Tower adapters running interceptors in front of a call service.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use pin_project_lite::pin_project;
use tower_layer::Layer;
use tower_service::Service;

use crate::call::{OutboundCall, Request};
use crate::error::CallError;
use crate::interceptor::ClientInterceptor;

/// Runs one interceptor, naming it in the error on refusal.
pub(crate) fn run_interceptor(
	name: &Arc<str>,
	interceptor: &dyn ClientInterceptor,
	call: &mut OutboundCall,
) -> Result<(), CallError> {
	interceptor.intercept(call).map_err(|reason| {
		tracing::debug!(interceptor = %name, method = call.method(), %reason, "call rejected");
		CallError::Rejected {
			method: Box::from(call.method()),
			interceptor: Arc::clone(name),
			reason,
		}
	})
}

/// Applies a single interceptor as a [`Layer`].
#[derive(Clone)]
pub struct InterceptorLayer {
	name: Arc<str>,
	interceptor: Arc<dyn ClientInterceptor>,
}

impl InterceptorLayer {
	/// Layer running `interceptor`, reported as `name` on rejection.
	pub fn new(name: impl Into<Arc<str>>, interceptor: Arc<dyn ClientInterceptor>) -> Self {
		Self {
			name: name.into(),
			interceptor,
		}
	}
}

impl<S> Layer<S> for InterceptorLayer {
	type Service = Intercepted<S>;

	fn layer(&self, inner: S) -> Self::Service {
		Intercepted {
			inner,
			name: Arc::clone(&self.name),
			interceptor: Arc::clone(&self.interceptor),
		}
	}
}

/// Service produced by [`InterceptorLayer`].
#[derive(Clone)]
pub struct Intercepted<S> {
	inner: S,
	name: Arc<str>,
	interceptor: Arc<dyn ClientInterceptor>,
}

impl<S, M> Service<Request<M>> for Intercepted<S>
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
		match run_interceptor(&self.name, self.interceptor.as_ref(), &mut req.call) {
			Ok(()) => InterceptFuture::forward(self.inner.call(req)),
			Err(err) => InterceptFuture::rejected(err.into()),
		}
	}
}

pin_project! {
	/// Response future of an intercepted call.
	#[project = InterceptFutureProj]
	pub enum InterceptFuture<F, E> {
		/// Interceptors passed; waiting on the inner service.
		Forward {
			#[pin]
			inner: F,
		},
		/// An interceptor refused the call.
		Rejected {
			error: Option<E>,
		},
	}
}

impl<F, E> InterceptFuture<F, E> {
	pub(crate) fn forward(inner: F) -> Self {
		Self::Forward { inner }
	}

	pub(crate) fn rejected(error: E) -> Self {
		Self::Rejected { error: Some(error) }
	}
}

impl<F, T, E> Future for InterceptFuture<F, E>
where
	F: Future<Output = Result<T, E>>,
{
	type Output = Result<T, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			InterceptFutureProj::Forward { inner } => inner.poll(cx),
			InterceptFutureProj::Rejected { error } => {
				Poll::Ready(Err(error.take().expect("InterceptFuture polled after completion")))
			}
		}
	}
}
