//! Candidate collection in registration order.
//!
//! The collector does not discover anything: callers register instances, run
//! configurers, and overlay configuration. Registration order is kept
//! verbatim because it is the final tie-break during resolution.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::candidate::{Candidate, OrderHint, Ordered};
use crate::config::OrderingConfig;
use crate::error::ResolveError;
use crate::resolver::{ResolvedChain, resolve};

/// What to do with several registrations sharing a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
	/// Keep every registration.
	#[default]
	KeepAll,
	/// Keep the earliest registration of each name.
	FirstWins,
	/// Keep the latest registration of each name, at its own position.
	LastWins,
}

/// Hook that contributes candidates to a collector.
pub trait InterceptorConfigurer<I: ?Sized> {
	/// Registers candidates on `collector`.
	fn configure(&self, collector: &mut Collector<I>);
}

impl<I: ?Sized, F> InterceptorConfigurer<I> for F
where
	F: Fn(&mut Collector<I>),
{
	fn configure(&self, collector: &mut Collector<I>) {
		self(collector)
	}
}

/// Ordered registration list.
pub struct Collector<I: ?Sized> {
	registered: Vec<Candidate<I>>,
	duplicates: DuplicatePolicy,
}

impl<I: ?Sized> Default for Collector<I> {
	fn default() -> Self {
		Self {
			registered: Vec::new(),
			duplicates: DuplicatePolicy::default(),
		}
	}
}

impl<I: ?Sized> core::fmt::Debug for Collector<I> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Collector")
			.field("registered", &self.registered)
			.field("duplicates", &self.duplicates)
			.finish()
	}
}

/// Handle to a just-registered candidate for attaching hints.
pub struct CandidateEntry<'a, I: ?Sized> {
	candidate: &'a mut Candidate<I>,
}

impl<I: ?Sized> CandidateEntry<'_, I> {
	/// Sets the explicit order.
	pub fn order(self, order: impl Into<OrderHint>) -> Self {
		self.candidate.hints_mut().explicit_order = Some(order.into());
		self
	}

	/// Sets the priority.
	pub fn priority(self, priority: impl Into<OrderHint>) -> Self {
		self.candidate.hints_mut().priority = Some(priority.into());
		self
	}

	/// Sets the capability order.
	pub fn capability_order(self, order: impl Into<OrderHint>) -> Self {
		self.candidate.hints_mut().capability_order = Some(order.into());
		self
	}

	/// Sets the explicit order from unparsed text.
	pub fn raw_order(self, text: &str) -> Self {
		self.order(OrderHint::Text(Box::from(text)))
	}

	/// Sets the priority from unparsed text.
	pub fn raw_priority(self, text: &str) -> Self {
		self.priority(OrderHint::Text(Box::from(text)))
	}
}

impl<I: ?Sized> Collector<I> {
	/// Empty collector keeping every registration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the duplicate policy.
	#[must_use]
	pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
		self.duplicates = policy;
		self
	}

	/// Current duplicate policy.
	pub fn duplicate_policy(&self) -> DuplicatePolicy {
		self.duplicates
	}

	/// Registers an interceptor without hints.
	pub fn register(
		&mut self,
		name: impl Into<Box<str>>,
		interceptor: Arc<I>,
	) -> CandidateEntry<'_, I> {
		self.push(Candidate::new(name, interceptor))
	}

	/// Registers a pre-built candidate.
	pub fn push(&mut self, candidate: Candidate<I>) -> CandidateEntry<'_, I> {
		self.registered.push(candidate);
		let last = self.registered.len() - 1;
		CandidateEntry {
			candidate: &mut self.registered[last],
		}
	}

	/// Runs a configurer against this collector.
	pub fn apply(&mut self, configurer: &dyn InterceptorConfigurer<I>) -> &mut Self {
		configurer.configure(self);
		self
	}

	/// Overlays configured hints by name.
	///
	/// A configured hint replaces the candidate's hint of the same kind; other
	/// kinds are left alone.
	pub fn apply_config(&mut self, config: &OrderingConfig) -> &mut Self {
		for (name, entry) in &config.interceptors {
			let mut matched = false;
			for candidate in self.registered.iter_mut().filter(|c| c.name() == name) {
				matched = true;
				let hints = candidate.hints_mut();
				if let Some(order) = &entry.order {
					hints.explicit_order = Some(order.to_hint());
				}
				if let Some(priority) = &entry.priority {
					hints.priority = Some(priority.to_hint());
				}
			}
			if !matched {
				tracing::warn!(
					interceptor = %name,
					"ordering config names no registered interceptor"
				);
			}
		}
		self
	}

	/// Every registration, duplicates included.
	pub fn registered(&self) -> &[Candidate<I>] {
		&self.registered
	}

	/// Number of registrations.
	pub fn len(&self) -> usize {
		self.registered.len()
	}

	/// True when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.registered.is_empty()
	}

	/// Candidates after applying the duplicate policy.
	pub fn candidates(&self) -> Vec<Candidate<I>> {
		self.filtered().cloned().collect()
	}

	/// Consumes the collector, returning candidates after the duplicate policy.
	pub fn into_candidates(self) -> Vec<Candidate<I>> {
		if self.duplicates == DuplicatePolicy::KeepAll {
			return self.registered;
		}
		self.candidates()
	}

	/// Resolves the collected candidates.
	pub fn resolve(&self) -> Result<ResolvedChain<I>, ResolveError> {
		resolve(&self.candidates())
	}

	fn filtered(&self) -> impl Iterator<Item = &Candidate<I>> + '_ {
		let keep = self.kept_indices();
		self.registered
			.iter()
			.enumerate()
			.filter(move |(i, _)| keep.as_ref().is_none_or(|k| k.contains(i)))
			.map(|(_, c)| c)
	}

	fn kept_indices(&self) -> Option<FxHashSet<usize>> {
		let mut seen = FxHashSet::default();
		let keep: FxHashSet<usize> = match self.duplicates {
			DuplicatePolicy::KeepAll => return None,
			DuplicatePolicy::FirstWins => self
				.registered
				.iter()
				.enumerate()
				.filter(|(_, c)| seen.insert(c.name()))
				.map(|(i, _)| i)
				.collect(),
			DuplicatePolicy::LastWins => self
				.registered
				.iter()
				.enumerate()
				.rev()
				.filter(|(_, c)| seen.insert(c.name()))
				.map(|(i, _)| i)
				.collect(),
		};
		let dropped = self.registered.len() - keep.len();
		if dropped > 0 {
			for (_, c) in self.registered.iter().enumerate().filter(|(i, _)| !keep.contains(i)) {
				tracing::trace!(interceptor = c.name(), "skipping duplicate registration");
			}
			tracing::warn!(
				dropped,
				policy = ?self.duplicates,
				"dropped duplicate interceptor registrations"
			);
		}
		Some(keep)
	}
}

impl<I: Ordered + ?Sized> Collector<I> {
	/// Registers an interceptor whose capability order is read from the instance.
	pub fn register_ordered(
		&mut self,
		name: impl Into<Box<str>>,
		interceptor: Arc<I>,
	) -> CandidateEntry<'_, I> {
		self.push(Candidate::ordered(name, interceptor))
	}
}

impl<I: ?Sized> FromIterator<Candidate<I>> for Collector<I> {
	fn from_iter<T: IntoIterator<Item = Candidate<I>>>(iter: T) -> Self {
		Self {
			registered: iter.into_iter().collect(),
			duplicates: DuplicatePolicy::default(),
		}
	}
}

impl<I: ?Sized> Extend<Candidate<I>> for Collector<I> {
	fn extend<T: IntoIterator<Item = Candidate<I>>>(&mut self, iter: T) {
		self.registered.extend(iter);
	}
}
