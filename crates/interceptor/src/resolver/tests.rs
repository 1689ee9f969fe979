use std::sync::Arc;

use proptest::prelude::*;

use super::*;
use crate::candidate::OrderHint;
use crate::order::InterceptorOrder;

struct Noop;

fn candidate(name: &str) -> Candidate<Noop> {
	Candidate::new(name, Arc::new(Noop))
}

fn names(chain: &ResolvedChain<Noop>) -> Vec<&str> {
	chain.names().collect()
}

#[test]
fn explicit_order_sorts_ascending() {
	let input = [candidate("second").order(2), candidate("first").order(1)];
	let chain = resolve(&input).unwrap();
	assert_eq!(names(&chain), ["first", "second"]);
	assert_eq!(input[0].name(), "second", "input must not be reordered");
}

#[test]
fn priority_sorts_ascending() {
	let input = [candidate("second").priority(2), candidate("first").priority(1)];
	assert_eq!(names(&resolve(&input).unwrap()), ["first", "second"]);
}

#[test]
fn capability_sorts_ascending() {
	let input = [
		candidate("second").capability_order(2),
		candidate("first").capability_order(1),
	];
	assert_eq!(names(&resolve(&input).unwrap()), ["first", "second"]);
}

#[test]
fn explicit_order_shadows_priority_and_capability() {
	let hints = OrderHints {
		explicit_order: Some(OrderHint::Value(5)),
		priority: Some(OrderHint::Value(1)),
		capability_order: Some(OrderHint::Value(-100)),
	};
	let order = effective_order(&hints).unwrap();
	assert_eq!(order.key, 5);
	assert_eq!(order.source, OrderSource::Explicit);

	let input = [
		candidate("a").order(5).priority(1),
		candidate("b").order(3),
		candidate("c").priority(1),
	];
	assert_eq!(names(&resolve(&input).unwrap()), ["c", "b", "a"]);
}

#[test]
fn priority_shadows_capability() {
	let input = [
		candidate("a").priority(10).capability_order(-5),
		candidate("b").capability_order(0),
	];
	let chain = resolve(&input).unwrap();
	assert_eq!(names(&chain), ["b", "a"]);
	assert_eq!(chain.order_at(1).unwrap().source, OrderSource::Priority);
}

#[test]
fn unhinted_candidates_sort_last_in_registration_order() {
	let input = [
		candidate("plain-1"),
		candidate("ordered").order(InterceptorOrder::TracingMetrics),
		candidate("plain-2"),
		candidate("last").order(InterceptorOrder::Last),
	];
	let chain = resolve(&input).unwrap();
	assert_eq!(names(&chain), ["ordered", "plain-1", "plain-2", "last"]);
	assert_eq!(chain.order_at(1), Some(EffectiveOrder::DEFAULT));
}

#[test]
fn extreme_keys_do_not_overflow() {
	let input = [
		candidate("max").order(i32::MAX),
		candidate("min").order(i32::MIN),
		candidate("zero").order(0),
	];
	assert_eq!(names(&resolve(&input).unwrap()), ["min", "zero", "max"]);
}

#[test]
fn malformed_hint_fails_resolution() {
	let input = [candidate("ok").order(1), candidate("bad").priority("early")];
	let err = resolve(&input).unwrap_err();
	let ResolveError::MalformedHint {
		name, kind, reason, ..
	} = err;
	assert_eq!(&*name, "bad");
	assert_eq!(kind, HintKind::Priority);
	assert!(matches!(reason, HintError::NotNumeric { .. }));
}

#[test]
fn shadowed_malformed_hint_still_fails() {
	let input = [candidate("bad").order(1).capability_order(OrderHint::Integer(1 << 40))];
	assert!(matches!(
		resolve(&input),
		Err(ResolveError::MalformedHint {
			kind: HintKind::Capability,
			..
		})
	));
}

#[test]
fn empty_input_resolves_to_empty_chain() {
	let chain = resolve::<Noop>(&[]).unwrap();
	assert!(chain.is_empty());
}

#[test]
fn lookup_by_name() {
	let input = [candidate("b").order(2), candidate("a").order(1)];
	let chain = resolve(&input).unwrap();
	assert_eq!(chain.position("b"), Some(1));
	assert_eq!(chain.find("a").map(Candidate::name), Some("a"));
	assert!(chain.find("missing").is_none());
}

fn hint_strategy() -> impl Strategy<Value = Option<OrderHint>> {
	prop_oneof![
		Just(None),
		(-3i32..3).prop_map(|v| Some(OrderHint::Value(v))),
	]
}

fn hints_strategy() -> impl Strategy<Value = Vec<OrderHints>> {
	prop::collection::vec(
		(hint_strategy(), hint_strategy(), hint_strategy()).prop_map(|(e, p, c)| OrderHints {
			explicit_order: e,
			priority: p,
			capability_order: c,
		}),
		0..24,
	)
}

fn build(hints: &[OrderHints]) -> Vec<Candidate<Noop>> {
	hints
		.iter()
		.enumerate()
		.map(|(i, h)| Candidate::with_hints(format!("c{i}"), Arc::new(Noop), h.clone()))
		.collect()
}

proptest! {
	#[test]
	fn resolution_is_deterministic(hints in hints_strategy()) {
		let input = build(&hints);
		let a = resolve(&input).unwrap();
		let b = resolve(&input).unwrap();
		prop_assert_eq!(names(&a), names(&b));
	}

	#[test]
	fn resolution_keeps_every_candidate(hints in hints_strategy()) {
		let input = build(&hints);
		let chain = resolve(&input).unwrap();
		prop_assert_eq!(chain.len(), input.len());
		let mut seen: Vec<&str> = chain.names().collect();
		seen.sort_unstable();
		let mut expected: Vec<&str> = input.iter().map(Candidate::name).collect();
		expected.sort_unstable();
		prop_assert_eq!(seen, expected);
	}

	#[test]
	fn keys_ascend_and_ties_keep_registration_order(hints in hints_strategy()) {
		let input = build(&hints);
		let chain = resolve(&input).unwrap();
		let ordered: Vec<(i32, usize)> = chain
			.iter_ordered()
			.map(|(c, o)| (o.key, input.iter().position(|i| i.name() == c.name()).unwrap()))
			.collect();
		for pair in ordered.windows(2) {
			prop_assert!(pair[0] < pair[1], "{:?} out of order", pair);
		}
	}
}
