//! Published interceptor chain with atomic replacement.
//!
//! # Mental model
//!
//! * The registry owns one slot holding an `Arc` to an immutable published chain.
//! * Readers load the slot and clone the chain handle; they never block and
//!   never see a partially sorted chain.
//! * Writers resolve first, then swap the slot. A failed resolution leaves the
//!   slot untouched.
//! * A chain handed out before a swap stays valid for as long as it is held.
//!
//! # States
//!
//! `Empty` until the first successful publication, `Published` afterwards.
//! [`InterceptorRegistry::clear`] is teardown back to `Empty`.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::candidate::Candidate;
use crate::collector::Collector;
use crate::error::ResolveError;
use crate::resolver::{ResolvedChain, resolve};

/// Registry lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
	/// Nothing published yet.
	Empty,
	/// A chain is published.
	Published,
}

struct Published<I: ?Sized> {
	chain: ResolvedChain<I>,
	generation: u64,
}

/// Holder of the currently published interceptor chain.
pub struct InterceptorRegistry<I: ?Sized> {
	slot: ArcSwapOption<Published<I>>,
}

impl<I: ?Sized> Default for InterceptorRegistry<I> {
	fn default() -> Self {
		Self {
			slot: ArcSwapOption::empty(),
		}
	}
}

impl<I: ?Sized> core::fmt::Debug for InterceptorRegistry<I> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let snap = self.slot.load();
		match snap.as_deref() {
			Some(published) => f
				.debug_struct("InterceptorRegistry")
				.field("generation", &published.generation)
				.field("chain", &published.chain)
				.finish(),
			None => f.debug_struct("InterceptorRegistry").finish_non_exhaustive(),
		}
	}
}

impl<I: ?Sized> InterceptorRegistry<I> {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry already holding `chain`.
	pub fn with_chain(chain: ResolvedChain<I>) -> Self {
		let registry = Self::new();
		registry.replace(chain);
		registry
	}

	/// Current chain; empty while nothing is published.
	#[inline]
	pub fn list(&self) -> ResolvedChain<I> {
		self.slot
			.load()
			.as_deref()
			.map_or_else(ResolvedChain::empty, |p| p.chain.clone())
	}

	/// First interceptor named `name` in the current chain.
	pub fn get(&self, name: &str) -> Option<Candidate<I>> {
		self.slot
			.load()
			.as_deref()
			.and_then(|p| p.chain.find(name).cloned())
	}

	/// Swaps in `chain`, returning the previously published chain.
	pub fn replace(&self, chain: ResolvedChain<I>) -> Option<ResolvedChain<I>> {
		let prev = self.slot.rcu(|cur| {
			Some(Arc::new(Published {
				chain: chain.clone(),
				generation: cur.as_deref().map_or(0, |p| p.generation) + 1,
			}))
		});
		prev.map(|p| p.chain.clone())
	}

	/// Resolves `candidates` and publishes the result.
	///
	/// On error the registry keeps whatever it held before.
	pub fn publish(&self, candidates: &[Candidate<I>]) -> Result<ResolvedChain<I>, ResolveError> {
		let chain = resolve(candidates)?;
		self.replace(chain.clone());
		tracing::debug!(
			generation = self.generation(),
			count = chain.len(),
			"published interceptor chain"
		);
		Ok(chain)
	}

	/// Resolves the collector's candidates and publishes the result.
	pub fn reload(&self, collector: &Collector<I>) -> Result<ResolvedChain<I>, ResolveError> {
		self.publish(&collector.candidates())
	}

	/// Drops the published chain. Chains already handed out stay usable.
	pub fn clear(&self) -> Option<ResolvedChain<I>> {
		self.slot.swap(None).map(|p| p.chain.clone())
	}

	/// Lifecycle state.
	pub fn state(&self) -> RegistryState {
		if self.slot.load().is_some() {
			RegistryState::Published
		} else {
			RegistryState::Empty
		}
	}

	/// Number of publications since construction or the last clear.
	pub fn generation(&self) -> u64 {
		self.slot.load().as_deref().map_or(0, |p| p.generation)
	}

	/// Number of interceptors in the current chain.
	pub fn len(&self) -> usize {
		self.slot.load().as_deref().map_or(0, |p| p.chain.len())
	}

	/// True when the current chain has no interceptors.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests;
