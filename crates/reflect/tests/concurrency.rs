use std::sync::Arc;
use std::thread;

use marginalia_reflect::Reflector;
use marginalia_reflect::primitives::{CallError, Object, Value};
use marginalia_reflect::registry::{FieldOptions, MergeStrategy, names};
use pretty_assertions::assert_eq;

#[test]
fn writers_and_readers_share_a_reflector() {
	let reflector = Arc::new(Reflector::default());
	let module = Object::new();
	let members: Vec<Object> = (0..8).map(|_| Object::new()).collect();
	for (i, member) in members.iter().enumerate() {
		module.define(format!("m{i}"), member).unwrap();
	}

	let writers: Vec<_> = members
		.iter()
		.cloned()
		.enumerate()
		.map(|(i, member)| {
			let reflector = reflector.clone();
			thread::spawn(move || {
				for round in 0..50 {
					reflector
						.store()
						.set(&member, names::AUTHORS, Value::list([format!("author-{i}")]))
						.unwrap();
					reflector
						.store()
						.set(&member, names::NAME, format!("m{i}-{round}"))
						.unwrap();
				}
			})
		})
		.collect();

	let readers: Vec<_> = (0..4)
		.map(|_| {
			let reflector = reflector.clone();
			let module = module.clone();
			thread::spawn(move || {
				for _ in 0..50 {
					let authors = reflector.get(&module, names::AUTHORS).unwrap();
					if let Some(Value::List(items)) = authors {
						assert!(items.len() <= 8);
					}
				}
			})
		})
		.collect();

	for handle in writers.into_iter().chain(readers) {
		handle.join().unwrap();
	}

	let Some(Value::List(authors)) = reflector.get(&module, names::AUTHORS).unwrap() else {
		panic!("authors did not propagate");
	};
	assert_eq!(authors.len(), 8);
}

#[test]
fn fields_defined_concurrently_are_all_registered() {
	let reflector = Arc::new(Reflector::default());
	let before = reflector.registry().len();

	let handles: Vec<_> = (0..8)
		.map(|i| {
			let reflector = reflector.clone();
			thread::spawn(move || {
				reflector
					.registry()
					.define(
						&format!("custom-{i}"),
						FieldOptions::new().inheritable().propagating(MergeStrategy::Unique),
					)
					.unwrap();
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(reflector.registry().len(), before + 8);
	for i in 0..8 {
		assert!(reflector.registry().contains(&format!("custom-{i}")));
	}
}

#[test]
fn thunks_may_read_the_store_during_resolution() {
	let reflector = Arc::new(Reflector::default());
	let (parent, child) = (Object::new(), Object::new());
	reflector.store().set(&parent, names::SINCE, "2.0").unwrap();

	// The thunk re-enters the store; no lock may be held around the call.
	let link = {
		let reflector = reflector.clone();
		let parent = parent.clone();
		Object::thunk(move || {
			reflector
				.store()
				.set(&parent, names::HOMEPAGE, "https://example.org")
				.map_err(|err| CallError::thrown(err.to_string()))?;
			Ok(Value::from(&parent))
		})
	};
	reflector.store().set(&child, names::BELONGS_TO, link).unwrap();

	assert_eq!(reflector.get(&child, names::SINCE).unwrap(), Some(Value::from("2.0")));
	assert_eq!(
		reflector.get(&child, names::HOMEPAGE).unwrap(),
		Some(Value::from("https://example.org"))
	);
}
