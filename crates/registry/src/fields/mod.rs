//! Field descriptors, merge policies and the field registry.

pub mod builtins;
pub mod config;
pub mod def;
pub mod merge;
pub mod registry;

pub use builtins::{BUILTINS, BuiltinField, names};
pub use config::{FieldSpec, FieldsConfig};
pub use def::{Field, FieldOptions, FieldSource};
pub use merge::{Merge, MergeFn, MergeStrategy};
pub use registry::FieldRegistry;
