use thiserror::Error;

/// Failure raised by a callable object.
///
/// A callable signals failure by returning this instead of a value. Thunks,
/// accessors and examples all share it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
	/// The callable ran and reported a failure.
	#[error("{0}")]
	Thrown(String),
	/// The object has no call behaviour.
	#[error("object is not callable")]
	NotCallable,
}

impl CallError {
	/// Builds a [`CallError::Thrown`] from any message.
	pub fn thrown(message: impl Into<String>) -> Self {
		Self::Thrown(message.into())
	}
}

/// Errors from mutating an object's own state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectError {
	/// The object was frozen; its properties and embedded record are read-only.
	#[error("cannot modify a frozen object")]
	Frozen,
}
