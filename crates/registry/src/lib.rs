//! Field registry: the schema of every metadata key.
//!
//! A [`Field`] names a metadata key and decides whether resolution may fall
//! back to a logical parent (inheritance) or aggregate values from an
//! object's children (propagation), and how propagated values are merged.
//! [`FieldRegistry`] holds the built-in fields plus caller-defined ones.

pub mod error;
pub mod fields;
pub mod stability;

pub use error::{ConfigurationError, MergeError};
pub use fields::{
	BUILTINS, BuiltinField, Field, FieldOptions, FieldRegistry, FieldSource, FieldSpec,
	FieldsConfig, Merge, MergeFn, MergeStrategy, names,
};
pub use stability::{Stability, UnknownStability};
