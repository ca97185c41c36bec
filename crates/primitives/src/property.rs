use std::fmt;
use std::sync::Arc;

use crate::symbol::Symbol;
use crate::value::Value;

/// Key of an own property: a string name or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
	Name(Arc<str>),
	Symbol(Symbol),
}

impl PropertyKey {
	pub fn as_name(&self) -> Option<&str> {
		match self {
			Self::Name(name) => Some(name),
			Self::Symbol(_) => None,
		}
	}

	pub fn is_symbol(&self) -> bool {
		matches!(self, Self::Symbol(_))
	}
}

impl From<&str> for PropertyKey {
	fn from(name: &str) -> Self {
		Self::Name(name.into())
	}
}

impl From<String> for PropertyKey {
	fn from(name: String) -> Self {
		Self::Name(name.into())
	}
}

impl From<Symbol> for PropertyKey {
	fn from(symbol: Symbol) -> Self {
		Self::Symbol(symbol)
	}
}

impl From<&Symbol> for PropertyKey {
	fn from(symbol: &Symbol) -> Self {
		Self::Symbol(symbol.clone())
	}
}

impl fmt::Display for PropertyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.write_str(name),
			Self::Symbol(symbol) => write!(f, "[{symbol}]"),
		}
	}
}

/// How an own property exposes its value.
///
/// Ordering is significant: entries sharing a key sort `Value < Getter < Setter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
	Value,
	Getter,
	Setter,
}

impl PropertyKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Value => "value",
			Self::Getter => "getter",
			Self::Setter => "setter",
		}
	}
}

impl fmt::Display for PropertyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One own property as seen by reflection.
///
/// Accessor entries carry the getter or setter function itself, never the
/// result of invoking it. A key with both accessors yields two entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	pub name: PropertyKey,
	pub kind: PropertyKind,
	pub value: Value,
}

impl Entry {
	pub fn new(name: PropertyKey, kind: PropertyKind, value: Value) -> Self {
		Self { name, kind, value }
	}
}

/// Capability to list own properties for reflection.
///
/// Entries come back in discovery order; callers that need a stable order
/// sort them.
pub trait OwnEntries {
	fn own_entries(&self) -> Vec<Entry>;
}
