//! Reflective metadata for annotated object graphs.
//!
//! Metadata is attached to objects without changing their shape, either in
//! the [`MetadataStore`]'s identity-keyed overlay or in a record embedded in
//! the object itself, with the overlay taking precedence key by key.
//!
//! The [`Resolver`] answers "what is the value of this field for this
//! object" with a three-step fallback:
//!
//! 1. Own metadata, embedded or overlay.
//! 2. Inherited metadata, if the field allows it: full resolution on the
//!    object reached through the `belongsTo` thunk.
//! 3. Propagated metadata, if the field allows it: the field's merge over
//!    the own values of every object reachable through own properties.
//!
//! Both traversals are cycle-safe; a cycle truncates the answer and is never
//! an error.

pub mod config;
pub mod error;
pub mod harness;
pub mod properties;
pub mod resolver;
pub mod store;
mod target;

pub use config::ReflectConfig;
pub use error::{ConfigError, ReflectError, Result};
pub use harness::{ExampleCase, ExampleReport, ExampleRunner};
pub use marginalia_primitives as primitives;
pub use marginalia_registry as registry;
pub use properties::{CategoryGroup, PropertyEnumerator, UNCATEGORISED};
pub use resolver::{ParentLink, Resolver};
pub use store::MetadataStore;
pub use target::AsTarget;

use marginalia_primitives::Value;
use marginalia_registry::FieldRegistry;

/// A store, a field registry and a configuration travelling together.
///
/// Nothing here is global: independent reflectors never see each other's
/// metadata or fields.
#[derive(Debug, Default)]
pub struct Reflector {
	store: MetadataStore,
	registry: FieldRegistry,
	config: ReflectConfig,
}

impl Reflector {
	pub fn new(config: ReflectConfig) -> Self {
		Self::with_registry(config, FieldRegistry::with_builtins())
	}

	pub fn with_registry(config: ReflectConfig, registry: FieldRegistry) -> Self {
		Self {
			store: MetadataStore::from_config(&config),
			registry,
			config,
		}
	}

	pub fn store(&self) -> &MetadataStore {
		&self.store
	}

	pub fn registry(&self) -> &FieldRegistry {
		&self.registry
	}

	pub fn config(&self) -> &ReflectConfig {
		&self.config
	}

	pub fn resolver(&self) -> Resolver<'_> {
		Resolver::with_config(&self.store, &self.config)
	}

	pub fn examples(&self) -> ExampleRunner<'_> {
		ExampleRunner::new(self.resolver(), &self.registry)
			.with_heading(&self.config.example_heading)
	}

	/// Resolves a field by name using this reflector's registry.
	pub fn get(&self, target: &impl AsTarget, name: &str) -> Result<Option<Value>> {
		self.resolver().resolve_by_name(&self.registry, target, name)
	}
}
