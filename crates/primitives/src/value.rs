use std::sync::Arc;

use indexmap::IndexMap;

use crate::object::Object;
use crate::symbol::Symbol;

/// A metadata record: field name to value, in insertion order.
pub type Record = IndexMap<String, Value>;

/// A dynamically-typed value.
///
/// Everything except [`Value::Object`] is plain data compared by value.
/// Objects are compared by identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Number(f64),
	String(Arc<str>),
	Symbol(Symbol),
	List(Vec<Value>),
	Map(Record),
	Object(Object),
}

impl Value {
	/// Builds a list value from anything convertible into values.
	pub fn list<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Builds a map value from `(key, value)` pairs.
	pub fn map<I, K, T>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, T)>,
		K: Into<String>,
		T: Into<Value>,
	{
		Self::Map(
			pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Symbol(_) => "symbol",
			Self::List(_) => "list",
			Self::Map(_) => "map",
			Self::Object(o) if o.is_callable() => "function",
			Self::Object(_) => "object",
		}
	}

	/// Truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(b) => *b,
			Self::Number(n) => *n != 0.0 && !n.is_nan(),
			Self::String(s) => !s.is_empty(),
			Self::Symbol(_) | Self::List(_) | Self::Map(_) | Self::Object(_) => true,
		}
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Self::Object(_))
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&Record> {
		match self {
			Self::Map(record) => Some(record),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	pub fn into_object(self) -> Option<Object> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Self::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Self::Number(n.into())
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.into())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s.into())
	}
}

impl From<Arc<str>> for Value {
	fn from(s: Arc<str>) -> Self {
		Self::String(s)
	}
}

impl From<Symbol> for Value {
	fn from(s: Symbol) -> Self {
		Self::Symbol(s)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::List(items)
	}
}

impl From<Record> for Value {
	fn from(record: Record) -> Self {
		Self::Map(record)
	}
}

impl From<Object> for Value {
	fn from(o: Object) -> Self {
		Self::Object(o)
	}
}

impl From<&Object> for Value {
	fn from(o: &Object) -> Self {
		Self::Object(o.clone())
	}
}
