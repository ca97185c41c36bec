//! Field registry.
//!
//! Readers load an immutable snapshot; `define` publishes a new snapshot
//! with a compare-and-swap loop, so lookups never block on definitions.
//! Registries are plain values: tests and independent configurations each
//! build their own.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;

use super::builtins::BUILTINS;
use super::config::FieldsConfig;
use super::def::{Field, FieldOptions, FieldSource};
use crate::error::ConfigurationError;

#[cfg(test)]
mod tests;

#[derive(Clone, Default)]
struct FieldsSnapshot {
	/// Definition order is preserved for listing.
	by_name: IndexMap<Box<str>, Field>,
}

impl FieldsSnapshot {
	fn from_builtins() -> Self {
		let by_name = BUILTINS
			.iter()
			.map(|b| {
				let field = Field::new(b.name, b.options(), FieldSource::Builtin);
				(Box::from(b.name), field)
			})
			.collect();
		Self { by_name }
	}

	fn check_new(&self, name: &str) -> Result<(), ConfigurationError> {
		if name.is_empty() {
			return Err(ConfigurationError::EmptyName);
		}
		match self.by_name.get(name) {
			None => Ok(()),
			Some(existing) if existing.source == FieldSource::Builtin => {
				Err(ConfigurationError::BuiltinRedefined(name.to_string()))
			}
			Some(_) => Err(ConfigurationError::DuplicateField(name.to_string())),
		}
	}
}

pub struct FieldRegistry {
	snap: ArcSwap<FieldsSnapshot>,
}

impl FieldRegistry {
	/// A registry without any field, built-ins included.
	pub fn empty() -> Self {
		Self {
			snap: ArcSwap::from_pointee(FieldsSnapshot::default()),
		}
	}

	pub fn with_builtins() -> Self {
		Self {
			snap: ArcSwap::from_pointee(FieldsSnapshot::from_builtins()),
		}
	}

	#[inline]
	pub fn get(&self, name: &str) -> Option<Field> {
		self.snap.load().by_name.get(name).cloned()
	}

	/// The registered field, or an unregistered one with default policy.
	pub fn get_or_adhoc(&self, name: &str) -> Field {
		self.get(name).unwrap_or_else(|| Field::named(name))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.snap.load().by_name.contains_key(name)
	}

	/// Fields in definition order, built-ins first.
	pub fn items(&self) -> Vec<Field> {
		self.snap.load().by_name.values().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.snap.load().by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().by_name.is_empty()
	}

	/// Defines a new field.
	///
	/// Fails if `name` is empty, names a built-in, or is already defined.
	pub fn define(&self, name: &str, options: FieldOptions) -> Result<Field, ConfigurationError> {
		loop {
			let cur = self.snap.load_full();
			cur.check_new(name)?;

			let field = Field::new(name, options.clone(), FieldSource::Runtime);
			let mut next = (*cur).clone();
			next.by_name.insert(Box::from(name), field.clone());

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::debug!(
					domain = "fields",
					name,
					inherit = field.allows_inheritance(),
					propagate = field.allows_propagation(),
					"field defined",
				);
				return Ok(field);
			}
		}
	}

	/// Defines every field of `config`.
	///
	/// All fields are published in a single snapshot: either every field is
	/// defined or, on the first invalid name, none is.
	pub fn define_from_config(
		&self,
		config: &FieldsConfig,
	) -> Result<Vec<Field>, ConfigurationError> {
		loop {
			let cur = self.snap.load_full();
			let mut next = (*cur).clone();
			let mut defined = Vec::with_capacity(config.fields.len());
			for spec in &config.fields {
				next.check_new(&spec.name)?;
				let field = Field::new(&spec.name, spec.options(), FieldSource::Runtime);
				next.by_name.insert(Box::from(spec.name.as_str()), field.clone());
				defined.push(field);
			}

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::debug!(
					domain = "fields",
					count = defined.len(),
					"fields defined from config",
				);
				return Ok(defined);
			}
		}
	}
}

impl Default for FieldRegistry {
	fn default() -> Self {
		Self::with_builtins()
	}
}

impl std::fmt::Debug for FieldRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snap = self.snap.load();
		f.debug_struct("FieldRegistry")
			.field("fields", &snap.by_name.keys().collect::<Vec<_>>())
			.finish()
	}
}
