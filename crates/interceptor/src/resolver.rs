//! Order resolution.
//!
//! # Precedence
//!
//! Each candidate is sorted by exactly one key, taken from the first present
//! source in this list:
//!
//! 1. explicit order
//! 2. priority
//! 3. capability order ([`Ordered`](crate::Ordered))
//! 4. [`LOWEST_PRECEDENCE`]
//!
//! Sources are never combined. Every present hint must parse, including ones
//! shadowed by a higher source.
//!
//! # Ordering
//!
//! Ascending by key; equal keys keep registration order. The candidate name is
//! not part of the key.

use std::sync::Arc;

use crate::candidate::{Candidate, HintKind, OrderHint, OrderHints};
use crate::error::{HintError, ResolveError};
use crate::order::LOWEST_PRECEDENCE;

/// Which source produced a candidate's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSource {
	/// Explicit order declaration.
	Explicit,
	/// Priority declaration.
	Priority,
	/// Value reported by the interceptor.
	Capability,
	/// No hint present.
	Default,
}

impl From<HintKind> for OrderSource {
	fn from(kind: HintKind) -> Self {
		match kind {
			HintKind::Explicit => Self::Explicit,
			HintKind::Priority => Self::Priority,
			HintKind::Capability => Self::Capability,
		}
	}
}

/// Sort key of one candidate and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectiveOrder {
	/// Sort key; lower runs earlier.
	pub key: i32,
	/// Source that produced `key`.
	pub source: OrderSource,
}

impl EffectiveOrder {
	/// Key used when no hint is present.
	pub const DEFAULT: Self = Self {
		key: LOWEST_PRECEDENCE,
		source: OrderSource::Default,
	};
}

const PRECEDENCE: [HintKind; 3] = [HintKind::Explicit, HintKind::Priority, HintKind::Capability];

struct BadHint<'a> {
	kind: HintKind,
	hint: &'a OrderHint,
	reason: HintError,
}

fn checked_order(hints: &OrderHints) -> Result<EffectiveOrder, BadHint<'_>> {
	let mut winner = None;
	for kind in PRECEDENCE {
		let Some(hint) = hints.get(kind) else {
			continue;
		};
		let key = hint.value().map_err(|reason| BadHint { kind, hint, reason })?;
		if winner.is_none() {
			winner = Some(EffectiveOrder {
				key,
				source: kind.into(),
			});
		}
	}
	Ok(winner.unwrap_or(EffectiveOrder::DEFAULT))
}

/// Computes the effective order of a set of hints.
pub fn effective_order(hints: &OrderHints) -> Result<EffectiveOrder, HintError> {
	checked_order(hints).map_err(|bad| bad.reason)
}

/// Orders candidates into an immutable chain.
///
/// The input is left untouched. Fails on the first malformed hint in
/// registration order.
pub fn resolve<I: ?Sized>(candidates: &[Candidate<I>]) -> Result<ResolvedChain<I>, ResolveError> {
	let mut keyed = Vec::with_capacity(candidates.len());
	for (index, candidate) in candidates.iter().enumerate() {
		let order =
			checked_order(candidate.hints()).map_err(|bad| ResolveError::MalformedHint {
				name: Box::from(candidate.name()),
				kind: bad.kind,
				value: bad.hint.clone(),
				reason: bad.reason,
			})?;
		keyed.push((order, index));
	}

	keyed.sort_by_key(|&(order, index)| (order.key, index));

	let entries: Arc<[Candidate<I>]> = keyed
		.iter()
		.map(|&(_, index)| candidates[index].clone())
		.collect();
	let orders: Arc<[EffectiveOrder]> = keyed.iter().map(|&(order, _)| order).collect();

	let chain = ResolvedChain { entries, orders };
	tracing::debug!(
		count = chain.len(),
		order = ?chain.names().collect::<Vec<_>>(),
		"resolved interceptor chain"
	);
	Ok(chain)
}

/// Immutable, ordered interceptor sequence. Clones share storage.
pub struct ResolvedChain<I: ?Sized> {
	entries: Arc<[Candidate<I>]>,
	orders: Arc<[EffectiveOrder]>,
}

impl<I: ?Sized> Clone for ResolvedChain<I> {
	fn clone(&self) -> Self {
		Self {
			entries: Arc::clone(&self.entries),
			orders: Arc::clone(&self.orders),
		}
	}
}

impl<I: ?Sized> core::fmt::Debug for ResolvedChain<I> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_list()
			.entries(
				self.entries
					.iter()
					.zip(self.orders.iter())
					.map(|(c, o)| (c.name(), o.key, o.source)),
			)
			.finish()
	}
}

impl<I: ?Sized> Default for ResolvedChain<I> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<I: ?Sized> ResolvedChain<I> {
	/// Chain with no interceptors.
	pub fn empty() -> Self {
		Self {
			entries: Arc::from(Vec::new()),
			orders: Arc::from(Vec::new()),
		}
	}

	/// Number of interceptors.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when the chain has no interceptors.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Candidates in chain order.
	pub fn as_slice(&self) -> &[Candidate<I>] {
		&self.entries
	}

	/// Iterates candidates in chain order.
	pub fn iter(&self) -> std::slice::Iter<'_, Candidate<I>> {
		self.entries.iter()
	}

	/// Iterates candidates with their effective order.
	pub fn iter_ordered(&self) -> impl Iterator<Item = (&Candidate<I>, EffectiveOrder)> + '_ {
		self.entries.iter().zip(self.orders.iter().copied())
	}

	/// Iterates interceptor instances in chain order.
	pub fn interceptors(&self) -> impl Iterator<Item = &Arc<I>> + '_ {
		self.entries.iter().map(Candidate::interceptor)
	}

	/// Iterates names in chain order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.iter().map(Candidate::name)
	}

	/// Candidate at `index`.
	pub fn get(&self, index: usize) -> Option<&Candidate<I>> {
		self.entries.get(index)
	}

	/// Effective order of the candidate at `index`.
	pub fn order_at(&self, index: usize) -> Option<EffectiveOrder> {
		self.orders.get(index).copied()
	}

	/// Index of the first candidate named `name`.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.entries.iter().position(|c| c.name() == name)
	}

	/// First candidate named `name`.
	pub fn find(&self, name: &str) -> Option<&Candidate<I>> {
		self.entries.iter().find(|c| c.name() == name)
	}

	/// True when both handles share the same storage.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.entries, &other.entries)
	}
}

impl<'a, I: ?Sized> IntoIterator for &'a ResolvedChain<I> {
	type Item = &'a Candidate<I>;
	type IntoIter = std::slice::Iter<'a, Candidate<I>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

#[cfg(test)]
mod tests;
