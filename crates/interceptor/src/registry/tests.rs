use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::candidate::Candidate;

struct Tag;

fn chain(names: &[&str]) -> ResolvedChain<Tag> {
	let candidates: Vec<_> = names
		.iter()
		.enumerate()
		.map(|(i, n)| Candidate::new(*n, Arc::new(Tag)).order(i as i32))
		.collect();
	resolve(&candidates).unwrap()
}

#[test]
fn starts_empty() {
	let registry = InterceptorRegistry::<Tag>::new();
	assert_eq!(registry.state(), RegistryState::Empty);
	assert_eq!(registry.generation(), 0);
	assert!(registry.list().is_empty());
	assert!(registry.get("any").is_none());
}

#[test]
fn replace_publishes_and_returns_previous() {
	let registry = InterceptorRegistry::new();
	assert!(registry.replace(chain(&["a"])).is_none());
	assert_eq!(registry.state(), RegistryState::Published);
	assert_eq!(registry.generation(), 1);

	let prev = registry.replace(chain(&["b", "c"])).unwrap();
	assert_eq!(prev.names().collect::<Vec<_>>(), ["a"]);
	assert_eq!(registry.generation(), 2);
	assert_eq!(registry.list().names().collect::<Vec<_>>(), ["b", "c"]);
}

#[test]
fn held_chain_survives_replacement() {
	let registry = InterceptorRegistry::with_chain(chain(&["old"]));
	let held = registry.list();
	registry.replace(chain(&["new"]));
	assert_eq!(held.names().collect::<Vec<_>>(), ["old"]);
	assert_eq!(registry.list().names().collect::<Vec<_>>(), ["new"]);
}

#[test]
fn reads_share_storage() {
	let registry = InterceptorRegistry::with_chain(chain(&["a", "b"]));
	assert!(registry.list().ptr_eq(&registry.list()));
}

#[test]
fn failed_publish_leaves_registry_untouched() {
	let registry = InterceptorRegistry::with_chain(chain(&["kept"]));
	let bad = [Candidate::new("bad", Arc::new(Tag)).order("not-a-number")];
	assert!(registry.publish(&bad).is_err());
	assert_eq!(registry.generation(), 1);
	assert_eq!(registry.list().names().collect::<Vec<_>>(), ["kept"]);

	let empty = InterceptorRegistry::<Tag>::new();
	assert!(empty.publish(&bad).is_err());
	assert_eq!(empty.state(), RegistryState::Empty);
}

#[test]
fn reload_resolves_collector() {
	let mut collector = Collector::new();
	collector.register("second", Arc::new(Tag)).priority(2);
	collector.register("first", Arc::new(Tag)).priority(1);

	let registry = InterceptorRegistry::new();
	registry.reload(&collector).unwrap();
	assert_eq!(registry.list().names().collect::<Vec<_>>(), ["first", "second"]);
	assert_eq!(registry.get("second").map(|c| c.name().to_owned()).as_deref(), Some("second"));
}

#[test]
fn clear_returns_to_empty() {
	let registry = InterceptorRegistry::with_chain(chain(&["a"]));
	let held = registry.list();
	assert!(registry.clear().is_some());
	assert_eq!(registry.state(), RegistryState::Empty);
	assert_eq!(held.len(), 1);
}

#[test]
fn concurrent_readers_see_whole_chains() {
	let old: Vec<String> = (0..64).map(|i| format!("old-{i}")).collect();
	let new: Vec<String> = (0..32).map(|i| format!("new-{i}")).collect();
	let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
	let new_refs: Vec<&str> = new.iter().map(String::as_str).collect();

	let registry = InterceptorRegistry::with_chain(chain(&old_refs));
	let done = AtomicBool::new(false);

	std::thread::scope(|s| {
		for _ in 0..4 {
			s.spawn(|| {
				while !done.load(Ordering::Acquire) {
					let snapshot = registry.list();
					let names: Vec<&str> = snapshot.names().collect();
					assert!(
						names == old_refs || names == new_refs,
						"torn read of {} entries",
						names.len()
					);
				}
			});
		}

		for round in 0..200 {
			let next = if round % 2 == 0 { &new_refs } else { &old_refs };
			registry.replace(chain(next));
		}
		done.store(true, Ordering::Release);
	});

	assert_eq!(registry.generation(), 201);
}
