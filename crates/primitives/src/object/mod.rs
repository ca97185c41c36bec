//! Reference-identity object handles.
//!
//! An [`Object`] is a cheap, clonable handle; clones share the same
//! underlying cell and compare equal. Each object owns an ordered property
//! table, an optional embedded metadata record, and optionally a call
//! behaviour, which makes it a function.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{CallError, ObjectError};
use crate::property::{Entry, OwnEntries, PropertyKey, PropertyKind};
use crate::value::{Record, Value};


/// Call behaviour of a function object.
pub type Callable = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

/// Storage of one own property.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
	Data(Value),
	Accessor {
		getter: Option<Object>,
		setter: Option<Object>,
	},
}

struct Property {
	key: PropertyKey,
	slot: Slot,
}

struct ObjectCell {
	/// Own properties in definition order.
	properties: RwLock<Vec<Property>>,
	/// Metadata carried by the object itself.
	embedded: RwLock<Option<Record>>,
	callable: Option<Callable>,
	frozen: AtomicBool,
}

/// Stable identity of a live object.
///
/// Only meaningful while the object is alive; a dropped object's id may be
/// reused by a later allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

/// A reference-typed host value.
#[derive(Clone)]
pub struct Object(Arc<ObjectCell>);

impl Object {
	pub fn new() -> Self {
		Self::with_callable(None)
	}

	/// Creates a function object.
	pub fn function<F>(f: F) -> Self
	where
		F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
	{
		Self::with_callable(Some(Arc::new(f)))
	}

	/// Creates a zero-argument function object.
	pub fn thunk<F>(f: F) -> Self
	where
		F: Fn() -> Result<Value, CallError> + Send + Sync + 'static,
	{
		Self::function(move |_| f())
	}

	fn with_callable(callable: Option<Callable>) -> Self {
		Self(Arc::new(ObjectCell {
			properties: RwLock::new(Vec::new()),
			embedded: RwLock::new(None),
			callable,
			frozen: AtomicBool::new(false),
		}))
	}

	#[inline]
	pub fn id(&self) -> ObjectId {
		ObjectId(Arc::as_ptr(&self.0) as usize)
	}

	#[inline]
	pub fn ptr_eq(&self, other: &Object) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	pub fn downgrade(&self) -> WeakObject {
		WeakObject(Arc::downgrade(&self.0))
	}

	pub fn is_callable(&self) -> bool {
		self.0.callable.is_some()
	}

	/// Invokes the object's call behaviour.
	///
	/// No lock of this object is held while the callable runs.
	pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
		let callable = self.0.callable.as_ref().ok_or(CallError::NotCallable)?;
		callable(args)
	}

	pub fn is_frozen(&self) -> bool {
		self.0.frozen.load(Ordering::Acquire)
	}

	/// Makes the property table and embedded record read-only.
	pub fn freeze(&self) {
		self.0.frozen.store(true, Ordering::Release);
	}

	fn ensure_mutable(&self) -> Result<(), ObjectError> {
		if self.is_frozen() {
			return Err(ObjectError::Frozen);
		}
		Ok(())
	}

	/// Defines or replaces a data property.
	///
	/// Replacing keeps the key's original position.
	pub fn define(
		&self,
		key: impl Into<PropertyKey>,
		value: impl Into<Value>,
	) -> Result<(), ObjectError> {
		self.ensure_mutable()?;
		let key = key.into();
		let slot = Slot::Data(value.into());
		let mut props = self.0.properties.write();
		match props.iter_mut().find(|p| p.key == key) {
			Some(prop) => prop.slot = slot,
			None => props.push(Property { key, slot }),
		}
		Ok(())
	}

	/// Installs a getter, keeping any setter already defined under `key`.
	pub fn define_getter(
		&self,
		key: impl Into<PropertyKey>,
		getter: Object,
	) -> Result<(), ObjectError> {
		self.define_accessor(key.into(), Some(getter), None)
	}

	/// Installs a setter, keeping any getter already defined under `key`.
	pub fn define_setter(
		&self,
		key: impl Into<PropertyKey>,
		setter: Object,
	) -> Result<(), ObjectError> {
		self.define_accessor(key.into(), None, Some(setter))
	}

	fn define_accessor(
		&self,
		key: PropertyKey,
		new_getter: Option<Object>,
		new_setter: Option<Object>,
	) -> Result<(), ObjectError> {
		self.ensure_mutable()?;
		let mut props = self.0.properties.write();
		match props.iter_mut().find(|p| p.key == key) {
			Some(Property {
				slot: Slot::Accessor { getter, setter },
				..
			}) => {
				if new_getter.is_some() {
					*getter = new_getter;
				}
				if new_setter.is_some() {
					*setter = new_setter;
				}
			}
			Some(prop) => {
				prop.slot = Slot::Accessor {
					getter: new_getter,
					setter: new_setter,
				}
			}
			None => props.push(Property {
				key,
				slot: Slot::Accessor {
					getter: new_getter,
					setter: new_setter,
				},
			}),
		}
		Ok(())
	}

	/// Removes an own property, returning its slot.
	pub fn remove(&self, key: impl Into<PropertyKey>) -> Result<Option<Slot>, ObjectError> {
		self.ensure_mutable()?;
		let key = key.into();
		let mut props = self.0.properties.write();
		Ok(props
			.iter()
			.position(|p| p.key == key)
			.map(|idx| props.remove(idx).slot))
	}

	/// Returns the raw slot stored under `key`.
	pub fn slot(&self, key: impl Into<PropertyKey>) -> Option<Slot> {
		let key = key.into();
		self.0
			.properties
			.read()
			.iter()
			.find(|p| p.key == key)
			.map(|p| p.slot.clone())
	}

	/// Returns the value of a data property.
	pub fn property(&self, key: impl Into<PropertyKey>) -> Option<Value> {
		match self.slot(key)? {
			Slot::Data(value) => Some(value),
			Slot::Accessor { .. } => None,
		}
	}

	/// Returns the getter function stored under `key`.
	pub fn getter(&self, key: impl Into<PropertyKey>) -> Option<Object> {
		match self.slot(key)? {
			Slot::Accessor { getter, .. } => getter,
			Slot::Data(_) => None,
		}
	}

	/// Returns the setter function stored under `key`.
	pub fn setter(&self, key: impl Into<PropertyKey>) -> Option<Object> {
		match self.slot(key)? {
			Slot::Accessor { setter, .. } => setter,
			Slot::Data(_) => None,
		}
	}

	/// Own keys in definition order.
	pub fn keys(&self) -> Vec<PropertyKey> {
		self.0
			.properties
			.read()
			.iter()
			.map(|p| p.key.clone())
			.collect()
	}

	pub fn len(&self) -> usize {
		self.0.properties.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.properties.read().is_empty()
	}

	/// Snapshot of the embedded metadata record.
	pub fn embedded(&self) -> Option<Record> {
		self.0.embedded.read().clone()
	}

	/// Reads one field of the embedded record.
	pub fn embedded_field(&self, key: &str) -> Option<Value> {
		self.0.embedded.read().as_ref()?.get(key).cloned()
	}

	/// Replaces the embedded record.
	pub fn embed(&self, record: Record) -> Result<(), ObjectError> {
		self.ensure_mutable()?;
		*self.0.embedded.write() = Some(record);
		Ok(())
	}

	/// Writes a single field into the embedded record, creating it if needed.
	pub fn embed_field(
		&self,
		key: impl Into<String>,
		value: impl Into<Value>,
	) -> Result<(), ObjectError> {
		self.ensure_mutable()?;
		self.0
			.embedded
			.write()
			.get_or_insert_with(Record::default)
			.insert(key.into(), value.into());
		Ok(())
	}
}

impl Default for Object {
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Object {}

impl Hash for Object {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Never walk properties here: graphs may be cyclic.
		f.debug_struct("Object")
			.field("id", &format_args!("{:#x}", self.id().0))
			.field("callable", &self.is_callable())
			.finish()
	}
}

impl OwnEntries for Object {
	fn own_entries(&self) -> Vec<Entry> {
		let props = self.0.properties.read();
		let mut entries = Vec::with_capacity(props.len());
		for prop in props.iter() {
			match &prop.slot {
				Slot::Data(value) => {
					entries.push(Entry::new(prop.key.clone(), PropertyKind::Value, value.clone()));
				}
				Slot::Accessor { getter, setter } => {
					if let Some(getter) = getter {
						entries.push(Entry::new(
							prop.key.clone(),
							PropertyKind::Getter,
							Value::Object(getter.clone()),
						));
					}
					if let Some(setter) = setter {
						entries.push(Entry::new(
							prop.key.clone(),
							PropertyKind::Setter,
							Value::Object(setter.clone()),
						));
					}
				}
			}
		}
		entries
	}
}

/// Non-owning handle to an object.
#[derive(Clone)]
pub struct WeakObject(Weak<ObjectCell>);

impl WeakObject {
	pub fn upgrade(&self) -> Option<Object> {
		self.0.upgrade().map(Object)
	}

	pub fn is_alive(&self) -> bool {
		self.0.strong_count() > 0
	}

	/// Whether this handle was created from `object` and the object is alive.
	pub fn refers_to(&self, object: &Object) -> bool {
		self.is_alive() && std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&object.0))
	}
}

impl fmt::Debug for WeakObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakObject")
			.field("alive", &self.is_alive())
			.finish()
	}
}
