//! Outbound RPC call chains built from resolved client interceptors.
//!
//! This crate is the consumer side of [`ordo_interceptor`]:
//! * [`ClientInterceptor`]: logic run around an outbound call
//! * [`InterceptorLayer`]: a single interceptor as a [`tower_layer::Layer`]
//! * [`ClientChain`]: global plus per-client interceptors, applied in resolved order
//!
//! Interceptors run in chain order: index 0 sees the call first.

#![warn(missing_docs)]

pub mod call;
pub mod chain;
pub mod error;
pub mod interceptor;
pub mod layer;

pub use call::{OutboundCall, Request};
pub use chain::{ChainService, ClientChain, ClientChainBuilder};
pub use error::{CallError, Rejection};
pub use interceptor::{
	ClientInterceptor, CollectorExt, FnInterceptor, GlobalInterceptors, InterceptorChain,
	interceptor_fn,
};
pub use layer::{InterceptFuture, Intercepted, InterceptorLayer};
