use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use marginalia_primitives::Value;

use super::merge::Merge;
use crate::error::MergeError;

/// Where a field was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
	/// Part of the built-in table.
	Builtin,
	/// Defined by a caller, directly or through configuration.
	Runtime,
	/// Created on the fly for a by-name query; never registered.
	AdHoc,
}

impl fmt::Display for FieldSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Builtin => write!(f, "builtin"),
			Self::Runtime => write!(f, "runtime"),
			Self::AdHoc => write!(f, "ad-hoc"),
		}
	}
}

/// Inheritance and propagation policy for a new field.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
	pub allow_inheritance: bool,
	pub allow_propagation: bool,
	/// Only consulted when `allow_propagation` is set.
	pub merge: Merge,
}

impl FieldOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Lets the field fall back to the value of the `belongsTo` parent.
	pub fn inheritable(mut self) -> Self {
		self.allow_inheritance = true;
		self
	}

	/// Lets the field aggregate children's values with `merge`.
	pub fn propagating(mut self, merge: impl Into<Merge>) -> Self {
		self.allow_propagation = true;
		self.merge = merge.into();
		self
	}
}

/// Immutable description of one metadata field.
pub struct FieldDef {
	pub name: Box<str>,
	pub allow_inheritance: bool,
	pub allow_propagation: bool,
	pub merge: Merge,
	pub source: FieldSource,
}

/// Shared handle to a field descriptor.
#[derive(Clone)]
pub struct Field(Arc<FieldDef>);

impl Field {
	pub(crate) fn new(name: &str, options: FieldOptions, source: FieldSource) -> Self {
		Self(Arc::new(FieldDef {
			name: name.into(),
			allow_inheritance: options.allow_inheritance,
			allow_propagation: options.allow_propagation,
			merge: options.merge,
			source,
		}))
	}

	/// Unregistered descriptor with default policy: own metadata only.
	pub fn named(name: &str) -> Self {
		Self::new(name, FieldOptions::default(), FieldSource::AdHoc)
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.0.name
	}

	#[inline]
	pub fn allows_inheritance(&self) -> bool {
		self.0.allow_inheritance
	}

	#[inline]
	pub fn allows_propagation(&self) -> bool {
		self.0.allow_propagation
	}

	/// Reduces propagated values to at most one result.
	pub fn merge(&self, values: Vec<Value>) -> Result<Option<Value>, MergeError> {
		self.0.merge.apply(&self.0.name, values)
	}

	pub fn ptr_eq(&self, other: &Field) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Deref for Field {
	type Target = FieldDef;

	fn deref(&self) -> &FieldDef {
		&self.0
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name())
			.field("inherit", &self.allows_inheritance())
			.field("propagate", &self.allows_propagation())
			.field("merge", &self.0.merge)
			.field("source", &self.0.source)
			.finish()
	}
}
