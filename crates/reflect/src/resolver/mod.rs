//! Field resolution over object graphs.
//!
//! # Resolution Order
//!
//! 1. Own metadata (overlay, then embedded record)
//! 2. Inherited, if the field allows it: full resolution on the `belongsTo`
//!    parent
//! 3. Propagated, if the field allows it: the field's merge over the own
//!    values of every object reachable through own properties
//!
//! Cycles in either direction end the walk early and are never an error.

mod parent;

pub use self::parent::ParentLink;

use marginalia_primitives::{Entry, Object, Value};
use marginalia_registry::{Field, FieldRegistry, names};
use rustc_hash::FxHashSet;

use crate::config::ReflectConfig;
use crate::error::Result;
use crate::properties::{CategoryGroup, PropertyEnumerator, UNCATEGORISED};
use crate::store::MetadataStore;
use crate::target::AsTarget;


/// Resolves fields against a [`MetadataStore`].
///
/// The resolver holds no state of its own and is cheap to copy. It never
/// writes to the store, and no store lock is held while a `belongsTo` thunk
/// or a merge function runs.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
	store: &'a MetadataStore,
	enumerator: PropertyEnumerator,
	uncategorised: &'a str,
}

impl<'a> Resolver<'a> {
	pub fn new(store: &'a MetadataStore) -> Self {
		Self {
			store,
			enumerator: PropertyEnumerator::new(),
			uncategorised: UNCATEGORISED,
		}
	}

	pub fn with_config(store: &'a MetadataStore, config: &'a ReflectConfig) -> Self {
		Self {
			store,
			enumerator: PropertyEnumerator::new().include_symbol_keys(config.include_symbol_keys),
			uncategorised: &config.uncategorised_label,
		}
	}

	pub fn store(&self) -> &'a MetadataStore {
		self.store
	}

	pub fn enumerator(&self) -> PropertyEnumerator {
		self.enumerator
	}

	/// Own metadata only.
	pub fn own(&self, target: &impl AsTarget, name: &str) -> Result<Option<Value>> {
		Ok(self.store.own(target.as_target()?, name))
	}

	/// Follows the `belongsTo` link once.
	pub fn parent(&self, target: &impl AsTarget) -> Result<Option<Object>> {
		Ok(self.parent_of(target.as_target()?))
	}

	/// First own value of `name` along the `belongsTo` chain, excluding the
	/// target itself.
	pub fn inherited(&self, target: &impl AsTarget, name: &str) -> Result<Option<Value>> {
		let object = target.as_target()?;
		let mut seen = FxHashSet::default();
		seen.insert(object.clone());

		let mut current = self.parent_of(object);
		while let Some(ancestor) = current {
			if !seen.insert(ancestor.clone()) {
				tracing::debug!(domain = "resolve", field = name, "belongsTo cycle");
				return Ok(None);
			}
			if let Some(value) = self.store.own(&ancestor, name) {
				return Ok(Some(value));
			}
			current = self.parent_of(&ancestor);
		}
		Ok(None)
	}

	/// Own values of `name` across everything reachable from the target
	/// through own properties, before merging. The target's own value is
	/// not included.
	///
	/// Objects are visited depth-first, each at most once, parents before
	/// children and children in enumeration order.
	pub fn propagated(&self, target: &impl AsTarget, name: &str) -> Result<Vec<Value>> {
		Ok(self.collect_descendants(target.as_target()?, name))
	}

	/// Resolves `field` with the full three-step fallback.
	pub fn resolve(&self, target: &impl AsTarget, field: &Field) -> Result<Option<Value>> {
		let object = target.as_target()?;
		let mut lineage = FxHashSet::default();
		lineage.insert(object.clone());
		self.resolve_in(object, field, &mut lineage)
	}

	/// Resolves the registered field called `name`, or an unregistered field
	/// with default policy if there is none.
	pub fn resolve_by_name(
		&self,
		registry: &FieldRegistry,
		target: &impl AsTarget,
		name: &str,
	) -> Result<Option<Value>> {
		self.resolve(target, &registry.get_or_adhoc(name))
	}

	pub fn enumerate(&self, target: &impl AsTarget) -> Result<Vec<Entry>> {
		Ok(self.enumerator.enumerate(target.as_target()?))
	}

	/// Own properties grouped by category.
	pub fn properties(&self, target: &impl AsTarget) -> Result<Vec<CategoryGroup>> {
		let object = target.as_target()?;
		Ok(self
			.enumerator
			.group_by_category(self.store, object, self.uncategorised))
	}

	fn resolve_in(
		&self,
		object: &Object,
		field: &Field,
		lineage: &mut FxHashSet<Object>,
	) -> Result<Option<Value>> {
		if let Some(value) = self.store.own(object, field.name()) {
			return Ok(Some(value));
		}

		if field.allows_inheritance()
			&& let Some(parent) = self.parent_of(object)
		{
			if lineage.insert(parent.clone()) {
				if let Some(value) = self.resolve_in(&parent, field, lineage)? {
					return Ok(Some(value));
				}
			} else {
				tracing::debug!(
					domain = "resolve",
					field = field.name(),
					"belongsTo cycle; skipping inheritance",
				);
			}
		}

		if field.allows_propagation() {
			let values = self.collect_descendants(object, field.name());
			tracing::trace!(
				domain = "resolve",
				field = field.name(),
				candidates = values.len(),
				"merging propagated values",
			);
			return Ok(field.merge(values)?);
		}

		Ok(None)
	}

	fn parent_of(&self, object: &Object) -> Option<Object> {
		ParentLink::from_value(self.store.own(object, names::BELONGS_TO)).follow()
	}

	fn collect_descendants(&self, root: &Object, name: &str) -> Vec<Value> {
		let mut values = Vec::new();
		let mut visited = FxHashSet::default();
		visited.insert(root.clone());
		let mut stack = self.enumerator.children(root);
		stack.reverse();

		while let Some(object) = stack.pop() {
			if !visited.insert(object.clone()) {
				continue;
			}
			if let Some(value) = self.store.own(&object, name) {
				values.push(value);
			}
			let children = self.enumerator.children(&object);
			stack.extend(children.into_iter().rev());
		}
		values
	}
}
