//! Physical metadata storage.
//!
//! Each object may carry two records: the record embedded in the object
//! itself, and an overlay record held here, keyed by object identity. The
//! effective own metadata is the embedded record with the overlay applied on
//! top, key by key. Only the overlay is written through the store, so frozen
//! objects can still be annotated.
//!
//! The overlay holds weak references and never keeps an object alive. Records
//! of dropped objects linger until the next prune, which runs when the
//! overlay grows past its watermark or on [`MetadataStore::prune`].

use marginalia_primitives::{Object, ObjectId, Record, Value, WeakObject};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::config::ReflectConfig;
use crate::error::Result;
use crate::target::AsTarget;


struct OverlayEntry {
	owner: WeakObject,
	record: Record,
}

struct Overlay {
	entries: FxHashMap<ObjectId, OverlayEntry>,
	/// Entry count at which the next prune runs.
	next_prune: usize,
	watermark: usize,
}

impl Overlay {
	fn live(&self, object: &Object) -> Option<&OverlayEntry> {
		self.entries
			.get(&object.id())
			.filter(|entry| entry.owner.refers_to(object))
	}

	fn record_mut(&mut self, object: &Object) -> &mut Record {
		let entry = self
			.entries
			.entry(object.id())
			.or_insert_with(|| OverlayEntry {
				owner: object.downgrade(),
				record: Record::default(),
			});
		// Same address, different object: the previous owner is gone.
		if !entry.owner.refers_to(object) {
			entry.owner = object.downgrade();
			entry.record.clear();
		}
		&mut entry.record
	}

	fn prune(&mut self) -> usize {
		let before = self.entries.len();
		self.entries.retain(|_, entry| entry.owner.is_alive());
		self.next_prune = self.watermark.max(self.entries.len() * 2);
		before - self.entries.len()
	}

	fn maybe_prune(&mut self) {
		if self.entries.len() >= self.next_prune {
			let removed = self.prune();
			tracing::debug!(
				domain = "store",
				removed,
				remaining = self.entries.len(),
				"pruned overlay",
			);
		}
	}
}

/// Identity-keyed metadata storage.
pub struct MetadataStore {
	overlay: RwLock<Overlay>,
}

impl MetadataStore {
	pub fn new() -> Self {
		Self::from_config(&ReflectConfig::default())
	}

	pub fn from_config(config: &ReflectConfig) -> Self {
		let watermark = config.overlay_prune_watermark.max(1);
		Self {
			overlay: RwLock::new(Overlay {
				entries: FxHashMap::default(),
				next_prune: watermark,
				watermark,
			}),
		}
	}

	/// Effective own metadata: embedded record overlaid with the store's record.
	pub fn get(&self, target: &impl AsTarget) -> Result<Record> {
		let object = target.as_target()?;
		let mut record = object.embedded().unwrap_or_default();
		if let Some(entry) = self.overlay.read().live(object) {
			for (key, value) in &entry.record {
				record.insert(key.clone(), value.clone());
			}
		}
		Ok(record)
	}

	/// One field of the effective own metadata.
	pub fn get_field(&self, target: &impl AsTarget, key: &str) -> Result<Option<Value>> {
		Ok(self.own(target.as_target()?, key))
	}

	/// The overlay record alone, without embedded metadata.
	pub fn overlay(&self, target: &impl AsTarget) -> Result<Option<Record>> {
		let object = target.as_target()?;
		Ok(self.overlay.read().live(object).map(|entry| entry.record.clone()))
	}

	/// Sets one overlay field, creating the overlay record on first use.
	pub fn set(
		&self,
		target: &impl AsTarget,
		key: impl Into<String>,
		value: impl Into<Value>,
	) -> Result<()> {
		let object = target.as_target()?;
		let key = key.into();
		tracing::trace!(domain = "store", key = %key, "set metadata");

		let mut overlay = self.overlay.write();
		overlay.record_mut(object).insert(key, value.into());
		overlay.maybe_prune();
		Ok(())
	}

	/// Sets every field of `partial`, in its iteration order.
	///
	/// The update is applied under a single lock acquisition, so readers see
	/// either none or all of it.
	pub fn update(&self, target: &impl AsTarget, partial: Record) -> Result<()> {
		let object = target.as_target()?;
		tracing::trace!(domain = "store", fields = partial.len(), "update metadata");

		let mut overlay = self.overlay.write();
		let record = overlay.record_mut(object);
		for (key, value) in partial {
			record.insert(key, value);
		}
		overlay.maybe_prune();
		Ok(())
	}

	/// Drops the overlay record of an object, returning it.
	pub fn forget(&self, target: &impl AsTarget) -> Result<Option<Record>> {
		let object = target.as_target()?;
		let mut overlay = self.overlay.write();
		if overlay.live(object).is_none() {
			return Ok(None);
		}
		Ok(overlay
			.entries
			.remove(&object.id())
			.map(|entry| entry.record))
	}

	/// Removes records whose object has been dropped. Returns how many.
	pub fn prune(&self) -> usize {
		self.overlay.write().prune()
	}

	/// Number of overlay records, including ones not yet pruned.
	pub fn len(&self) -> usize {
		self.overlay.read().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.overlay.read().entries.is_empty()
	}

	/// Own value of one field; the overlay wins over the embedded record.
	pub(crate) fn own(&self, object: &Object, key: &str) -> Option<Value> {
		let from_overlay = self
			.overlay
			.read()
			.live(object)
			.and_then(|entry| entry.record.get(key).cloned());
		from_overlay.or_else(|| object.embedded_field(key))
	}
}

impl Default for MetadataStore {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for MetadataStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let overlay = self.overlay.read();
		f.debug_struct("MetadataStore")
			.field("entries", &overlay.entries.len())
			.field("next_prune", &overlay.next_prune)
			.finish()
	}
}
