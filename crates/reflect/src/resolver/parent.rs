use marginalia_primitives::{Object, Value};

/// The `belongsTo` link of an object.
///
/// The link is a zero-argument function returning the logical parent, so
/// that a child may be annotated before its parent exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParentLink {
	#[default]
	None,
	Thunk(Object),
}

impl ParentLink {
	/// Reads a link from a raw `belongsTo` value. Anything but a function is
	/// treated as no link.
	pub fn from_value(value: Option<Value>) -> Self {
		match value {
			None => Self::None,
			Some(Value::Object(thunk)) if thunk.is_callable() => Self::Thunk(thunk),
			Some(other) => {
				tracing::debug!(
					domain = "resolve",
					got = other.type_name(),
					"belongsTo is not a function; ignoring",
				);
				Self::None
			}
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	/// Invokes the thunk. A thunk that fails or returns a non-object yields
	/// no parent.
	pub fn follow(&self) -> Option<Object> {
		let Self::Thunk(thunk) = self else {
			return None;
		};
		match thunk.call(&[]) {
			Ok(Value::Object(parent)) => Some(parent),
			Ok(other) => {
				tracing::debug!(
					domain = "resolve",
					got = other.type_name(),
					"belongsTo returned a non-object; treating as no parent",
				);
				None
			}
			Err(error) => {
				tracing::debug!(
					domain = "resolve",
					%error,
					"belongsTo failed; treating as no parent",
				);
				None
			}
		}
	}
}
