//! Deterministic listing of own properties.

use std::collections::BTreeMap;
use std::sync::Arc;

use marginalia_primitives::{Entry, Object, OwnEntries, PropertyKey, PropertyKind, Value};
use marginalia_registry::names;

use crate::store::MetadataStore;


/// Category of members that have none of their own.
pub const UNCATEGORISED: &str = "(Uncategorised)";

/// Members of an object sharing one `category`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
	pub category: String,
	pub members: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
	Name(Arc<str>),
	/// Rank of the symbol among the object's symbol keys, by first appearance.
	Symbol(usize),
}

/// Lists own properties in a total, stable order.
///
/// String keys come first in lexical order, then symbol keys in the order
/// they were first defined. Entries sharing a key are ordered value, getter,
/// setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyEnumerator {
	include_symbol_keys: bool,
}

impl Default for PropertyEnumerator {
	fn default() -> Self {
		Self::new()
	}
}

impl PropertyEnumerator {
	pub const fn new() -> Self {
		Self {
			include_symbol_keys: true,
		}
	}

	pub const fn include_symbol_keys(mut self, include: bool) -> Self {
		self.include_symbol_keys = include;
		self
	}

	pub fn enumerate<T: OwnEntries + ?Sized>(&self, object: &T) -> Vec<Entry> {
		let mut symbols: Vec<PropertyKey> = Vec::new();
		let mut keyed: Vec<((SortKey, PropertyKind), Entry)> = Vec::new();

		for entry in object.own_entries() {
			let key = match &entry.name {
				PropertyKey::Name(name) => SortKey::Name(name.clone()),
				PropertyKey::Symbol(_) if !self.include_symbol_keys => continue,
				PropertyKey::Symbol(_) => {
					let rank = match symbols.iter().position(|seen| *seen == entry.name) {
						Some(rank) => rank,
						None => {
							symbols.push(entry.name.clone());
							symbols.len() - 1
						}
					};
					SortKey::Symbol(rank)
				}
			};
			keyed.push(((key, entry.kind), entry));
		}

		keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
		keyed.into_iter().map(|(_, entry)| entry).collect()
	}

	/// Objects held by the entries of [`Self::enumerate`], in the same order.
	///
	/// Objects nested in list and map values count, in element order.
	/// Accessor entries contribute the getter or setter function, which is
	/// never invoked.
	pub fn children(&self, object: &Object) -> Vec<Object> {
		let mut children = Vec::new();
		for entry in self.enumerate(object) {
			collect_objects(&entry.value, &mut children);
		}
		children
	}

	/// Groups entries by the own `category` metadata of their values.
	///
	/// Categories are not inherited. Groups are sorted by category name and
	/// members keep the order of [`Self::enumerate`].
	pub fn group_by_category(
		&self,
		store: &MetadataStore,
		object: &Object,
		uncategorised: &str,
	) -> Vec<CategoryGroup> {
		let mut groups: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
		for entry in self.enumerate(object) {
			let category = entry
				.value
				.as_object()
				.and_then(|member| store.own(member, names::CATEGORY))
				.and_then(|category| category.as_str().map(str::to_owned))
				.unwrap_or_else(|| uncategorised.to_owned());
			groups.entry(category).or_default().push(entry);
		}
		groups
			.into_iter()
			.map(|(category, members)| CategoryGroup { category, members })
			.collect()
	}
}

/// Appends every object in `value`, looking through lists and maps.
fn collect_objects(value: &Value, out: &mut Vec<Object>) {
	match value {
		Value::Object(object) => out.push(object.clone()),
		Value::List(items) => items.iter().for_each(|item| collect_objects(item, out)),
		Value::Map(record) => record.values().for_each(|item| collect_objects(item, out)),
		_ => {}
	}
}
