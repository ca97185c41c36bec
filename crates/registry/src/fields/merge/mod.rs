//! Merge policies for propagated values.
//!
//! Propagation collects every value a field takes in an object's children;
//! a merge reduces that list to zero or one result. Every built-in strategy
//! yields nothing for an empty list.

use std::fmt;
use std::sync::Arc;

use marginalia_primitives::Value;
use serde::{Deserialize, Serialize};

use crate::error::MergeError;
use crate::stability::Stability;

#[cfg(test)]
mod tests;

/// Caller-supplied merge function.
pub type MergeFn = Arc<dyn Fn(Vec<Value>) -> Result<Option<Value>, MergeError> + Send + Sync>;

/// Named merge strategies, usable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
	/// The collected values as a list.
	#[default]
	Collect,
	/// Flattened one level and deduplicated, first occurrence wins.
	Unique,
	/// The candidate lowest on the stability scale.
	LeastStable,
	/// Logical AND over the candidates' truthiness.
	All,
}

impl MergeStrategy {
	pub fn apply(self, field: &str, values: Vec<Value>) -> Option<Value> {
		if values.is_empty() {
			return None;
		}
		match self {
			Self::Collect => Some(Value::List(values)),
			Self::Unique => unique(values),
			Self::LeastStable => least_stable(field, values),
			Self::All => Some(Value::Bool(values.iter().all(Value::is_truthy))),
		}
	}
}

fn unique(values: Vec<Value>) -> Option<Value> {
	let mut out: Vec<Value> = Vec::with_capacity(values.len());
	let mut push = |v: Value| {
		if !out.contains(&v) {
			out.push(v);
		}
	};
	for value in values {
		match value {
			Value::List(items) => items.into_iter().for_each(&mut push),
			other => push(other),
		}
	}
	(!out.is_empty()).then_some(Value::List(out))
}

fn least_stable(field: &str, values: Vec<Value>) -> Option<Value> {
	let mut best: Option<(Stability, Value)> = None;
	for value in values {
		let Some(id) = value.as_str() else {
			tracing::warn!(
				domain = "fields",
				field,
				got = value.type_name(),
				"stability candidate is not a string; skipping",
			);
			continue;
		};
		let stability = match Stability::from_identifier(id) {
			Ok(s) => s,
			Err(err) => {
				tracing::warn!(domain = "fields", field, %err, "skipping unknown stability");
				continue;
			}
		};
		if best.as_ref().is_none_or(|(current, _)| stability < *current) {
			best = Some((stability, value));
		}
	}
	best.map(|(_, value)| value)
}

/// How a propagating field reduces its collected values.
#[derive(Clone)]
pub enum Merge {
	Strategy(MergeStrategy),
	Custom(MergeFn),
}

impl Merge {
	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(Vec<Value>) -> Result<Option<Value>, MergeError> + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(f))
	}

	/// Applies the merge. Custom functions see the list even when empty.
	pub fn apply(&self, field: &str, values: Vec<Value>) -> Result<Option<Value>, MergeError> {
		match self {
			Self::Strategy(strategy) => Ok(strategy.apply(field, values)),
			Self::Custom(f) => f(values),
		}
	}
}

impl Default for Merge {
	fn default() -> Self {
		Self::Strategy(MergeStrategy::default())
	}
}

impl From<MergeStrategy> for Merge {
	fn from(strategy: MergeStrategy) -> Self {
		Self::Strategy(strategy)
	}
}

impl fmt::Debug for Merge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Strategy(strategy) => write!(f, "{strategy:?}"),
			Self::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}
