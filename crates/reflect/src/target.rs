use marginalia_primitives::{Object, Value};

use crate::error::{ReflectError, Result};

/// Anything that may name a metadata target.
///
/// Only objects carry metadata; every other value is rejected with
/// [`ReflectError::InvalidTarget`].
pub trait AsTarget {
	fn as_target(&self) -> Result<&Object>;
}

impl AsTarget for Object {
	#[inline]
	fn as_target(&self) -> Result<&Object> {
		Ok(self)
	}
}

impl AsTarget for Value {
	fn as_target(&self) -> Result<&Object> {
		match self {
			Value::Object(object) => Ok(object),
			other => Err(ReflectError::InvalidTarget {
				kind: describe(other),
			}),
		}
	}
}

fn describe(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => format!("a primitive value ({b})"),
		Value::Number(n) => format!("a primitive value ({n})"),
		Value::String(s) => format!("a primitive value ({s:?})"),
		Value::Symbol(s) => format!("a primitive value ({s})"),
		Value::List(_) => "a list".to_string(),
		Value::Map(_) => "a map".to_string(),
		Value::Object(_) => "an object".to_string(),
	}
}
