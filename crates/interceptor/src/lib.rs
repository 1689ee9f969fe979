//! Deterministic ordering for RPC client interceptor chains.
//!
//! Interceptors reach a client through several declaration styles: an explicit
//! order, a priority, or an order reported by the interceptor itself. This crate
//! folds those signals into one total order and publishes the result as an
//! immutable snapshot:
//!
//! * [`Collector`]: registration surface, keeps registration order
//! * [`resolve`]: precedence rule plus stable sort, producing a [`ResolvedChain`]
//! * [`InterceptorRegistry`]: atomically swappable holder read by chain builders
//! * [`OrderingConfig`]: TOML overlay for order and priority hints
//!
//! Index 0 of a resolved chain runs first (outermost) on an outbound call.

#![warn(missing_docs)]

pub mod candidate;
pub mod collector;
pub mod config;
pub mod error;
pub mod order;
pub mod registry;
pub mod resolver;

pub use candidate::{Candidate, HintKind, OrderHint, OrderHints, Ordered};
pub use collector::{CandidateEntry, Collector, DuplicatePolicy, InterceptorConfigurer};
pub use config::{HintConfig, HintValue, OrderingConfig};
pub use error::{ConfigError, HintError, ResolveError};
pub use order::{HIGHEST_PRECEDENCE, InterceptorOrder, LOWEST_PRECEDENCE};
pub use registry::{InterceptorRegistry, RegistryState};
pub use resolver::{EffectiveOrder, OrderSource, ResolvedChain, effective_order, resolve};
