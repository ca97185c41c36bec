use thiserror::Error;

/// Malformed field definitions, reported at definition time.
#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("field name must not be empty")]
	EmptyName,
	#[error("field '{0}' is already defined")]
	DuplicateField(String),
	#[error("built-in field '{0}' cannot be redefined")]
	BuiltinRedefined(String),
	#[error("failed to parse field definitions: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Failure of a merge function.
///
/// Built-in strategies never fail; custom merge functions report through this
/// and the error reaches the caller of `resolve` untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
	#[error("merge failed for field '{field}': {reason}")]
	Failed { field: String, reason: String },
}

impl MergeError {
	pub fn failed(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Failed {
			field: field.into(),
			reason: reason.into(),
		}
	}
}
