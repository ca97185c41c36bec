use marginalia_registry::MergeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectError {
	/// Metadata was requested for something that is not an object.
	#[error("metadata can only be associated with objects, but got {kind}")]
	InvalidTarget { kind: String },
	/// A field's merge function failed during propagation.
	#[error(transparent)]
	Merge(#[from] MergeError),
}

pub type Result<T> = std::result::Result<T, ReflectError>;

/// Errors loading a [`ReflectConfig`](crate::ReflectConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to parse configuration: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
