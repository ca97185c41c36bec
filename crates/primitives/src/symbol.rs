use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(0);

/// A unique property key.
///
/// Two symbols are equal only if one is a clone of the other, regardless of
/// description.
#[derive(Clone)]
pub struct Symbol {
	id: u64,
	description: Option<Arc<str>>,
}

impl Symbol {
	pub fn new(description: impl Into<Arc<str>>) -> Self {
		Self {
			id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
			description: Some(description.into()),
		}
	}

	pub fn anonymous() -> Self {
		Self {
			id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
			description: None,
		}
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}
}

impl PartialEq for Symbol {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for Symbol {}

impl Hash for Symbol {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Symbol#{}({})", self.id, self.description().unwrap_or(""))
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Symbol({})", self.description().unwrap_or(""))
	}
}
