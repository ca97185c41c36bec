//! Declarative field definitions.
//!
//! ```toml
//! [[fields]]
//! name = "reviewers"
//! inherit = true
//! propagate = true
//! merge = "unique"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::def::FieldOptions;
use super::merge::MergeStrategy;
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsConfig {
	#[serde(default)]
	pub fields: Vec<FieldSpec>,
}

/// One caller-defined field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
	pub name: String,
	#[serde(default)]
	pub inherit: bool,
	#[serde(default)]
	pub propagate: bool,
	#[serde(default)]
	pub merge: MergeStrategy,
}

impl FieldSpec {
	pub fn options(&self) -> FieldOptions {
		let options = FieldOptions {
			allow_inheritance: self.inherit,
			..FieldOptions::default()
		};
		if self.propagate {
			options.propagating(self.merge)
		} else {
			options
		}
	}
}

impl FieldsConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigurationError> {
		Ok(toml::from_str(source)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}
}
