//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::properties::UNCATEGORISED;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectConfig {
	/// Whether symbol-keyed properties are enumerated and traversed.
	#[serde(default = "default_include_symbol_keys")]
	pub include_symbol_keys: bool,
	/// Category of members without a category of their own.
	#[serde(default = "default_uncategorised_label")]
	pub uncategorised_label: String,
	/// Overlay size that triggers pruning of entries whose object is gone.
	/// The threshold doubles with the live entry count after each prune.
	#[serde(default = "default_overlay_prune_watermark")]
	pub overlay_prune_watermark: usize,
	/// Heading for examples without a name of their own.
	#[serde(default = "default_example_heading")]
	pub example_heading: String,
}

fn default_include_symbol_keys() -> bool {
	true
}

fn default_uncategorised_label() -> String {
	UNCATEGORISED.to_string()
}

fn default_overlay_prune_watermark() -> usize {
	256
}

fn default_example_heading() -> String {
	"Examples".to_string()
}

impl Default for ReflectConfig {
	fn default() -> Self {
		Self {
			include_symbol_keys: default_include_symbol_keys(),
			uncategorised_label: default_uncategorised_label(),
			overlay_prune_watermark: default_overlay_prune_watermark(),
			example_heading: default_example_heading(),
		}
	}
}

impl ReflectConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_document_uses_defaults() {
		assert_eq!(ReflectConfig::from_toml_str("").unwrap(), ReflectConfig::default());
	}

	#[test]
	fn test_partial_override() {
		let config = ReflectConfig::from_toml_str(
			r#"
			include_symbol_keys = false
			uncategorised_label = "Misc"
			"#,
		)
		.unwrap();
		assert!(!config.include_symbol_keys);
		assert_eq!(config.uncategorised_label, "Misc");
		assert_eq!(config.overlay_prune_watermark, 256);
		assert_eq!(config.example_heading, "Examples");
	}

	#[test]
	fn test_type_errors_are_reported() {
		assert!(matches!(
			ReflectConfig::from_toml_str("overlay_prune_watermark = \"lots\""),
			Err(ConfigError::Parse(_))
		));
	}
}
