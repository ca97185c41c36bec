use marginalia_primitives::{Object, Value};
use proptest::prelude::*;

use super::*;

fn strings(items: &[&str]) -> Vec<Value> {
	items.iter().map(|s| Value::from(*s)).collect()
}

#[test]
fn test_empty_input_yields_nothing() {
	for strategy in [
		MergeStrategy::Collect,
		MergeStrategy::Unique,
		MergeStrategy::LeastStable,
		MergeStrategy::All,
	] {
		assert_eq!(strategy.apply("f", Vec::new()), None, "{strategy:?}");
	}
}

#[test]
fn test_unique_flattens_and_keeps_first_seen_order() {
	let values = vec![
		Value::list(["alice", "bob"]),
		Value::from("carol"),
		Value::list(["bob", "alice"]),
		Value::from("carol"),
	];
	assert_eq!(
		MergeStrategy::Unique.apply("authors", values),
		Some(Value::list(["alice", "bob", "carol"]))
	);
}

#[test]
fn test_unique_flattens_a_single_level() {
	let nested = Value::list([Value::list(["a"])]);
	let result = MergeStrategy::Unique.apply("tags", vec![nested.clone(), nested]);
	assert_eq!(result, Some(Value::list([Value::list(["a"])])));
}

#[test]
fn test_unique_compares_objects_by_identity() {
	let a = Object::new();
	let b = Object::new();
	let values = vec![Value::from(&a), Value::from(&b), Value::from(&a)];
	assert_eq!(
		MergeStrategy::Unique.apply("authors", values),
		Some(Value::list([Value::from(&a), Value::from(&b)]))
	);
}

#[test]
fn test_unique_of_empty_lists_yields_nothing() {
	let values = vec![Value::List(Vec::new()), Value::List(Vec::new())];
	assert_eq!(MergeStrategy::Unique.apply("platforms", values), None);
}

#[test]
fn test_least_stable_picks_minimum() {
	let values = strings(&["stable", "locked", "experimental", "stable"]);
	assert_eq!(
		MergeStrategy::LeastStable.apply("stability", values),
		Some(Value::from("experimental"))
	);
}

#[test]
fn test_least_stable_skips_unknown_candidates() {
	let values = vec![Value::from("bogus"), Value::from(3), Value::from("locked")];
	assert_eq!(
		MergeStrategy::LeastStable.apply("stability", values),
		Some(Value::from("locked"))
	);
	assert_eq!(
		MergeStrategy::LeastStable.apply("stability", strings(&["bogus"])),
		None
	);
}

#[test]
fn test_all_is_logical_and() {
	let all = |values: Vec<Value>| MergeStrategy::All.apply("portable", values);
	assert_eq!(all(vec![true.into(), true.into()]), Some(Value::Bool(true)));
	assert_eq!(all(vec![true.into(), false.into()]), Some(Value::Bool(false)));
	assert_eq!(all(vec![Value::Null]), Some(Value::Bool(false)));
}

#[test]
fn test_collect_returns_list_unchanged() {
	let values = strings(&["b", "a", "b"]);
	assert_eq!(
		MergeStrategy::Collect.apply("f", values.clone()),
		Some(Value::List(values))
	);
}

#[test]
fn test_custom_merge_errors_pass_through() {
	let merge = Merge::custom(|_| Err(MergeError::failed("score", "bad policy")));
	assert_eq!(
		merge.apply("score", vec![Value::from(1)]),
		Err(MergeError::failed("score", "bad policy"))
	);
}

#[test]
fn test_custom_merge_sees_empty_input() {
	let merge = Merge::custom(|values| Ok(Some(Value::from(values.len() as f64))));
	assert_eq!(merge.apply("count", Vec::new()), Ok(Some(Value::from(0))));
}

fn arb_stability() -> impl Strategy<Value = &'static str> {
	prop_oneof![
		Just("deprecated"),
		Just("experimental"),
		Just("stable"),
		Just("locked"),
	]
}

proptest! {
	/// The least-stable merge ignores candidate order.
	#[test]
	fn prop_least_stable_order_independent(ids in prop::collection::vec(arb_stability(), 1..12)) {
		let forward: Vec<Value> = ids.iter().map(|s| Value::from(*s)).collect();
		let mut backward = forward.clone();
		backward.reverse();

		prop_assert_eq!(
			MergeStrategy::LeastStable.apply("stability", forward),
			MergeStrategy::LeastStable.apply("stability", backward)
		);
	}

	/// Unique output never contains duplicates and never grows the input.
	#[test]
	fn prop_unique_has_no_duplicates(items in prop::collection::vec(0u8..6, 1..20)) {
		let values: Vec<Value> = items.iter().map(|n| Value::from(i32::from(*n))).collect();
		let Some(Value::List(out)) = MergeStrategy::Unique.apply("tags", values) else {
			return Err(TestCaseError::fail("expected a list"));
		};
		for (i, v) in out.iter().enumerate() {
			prop_assert!(!out[i + 1..].contains(v));
		}
		prop_assert!(out.len() <= items.len());
	}
}
