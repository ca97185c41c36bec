//! Built-in field table.
//!
//! The set of names and their inheritance/propagation flags is fixed; other
//! tools reading the same metadata depend on it.

use super::def::FieldOptions;
use super::merge::MergeStrategy;

/// Names of the built-in fields.
pub mod names {
	// Definition
	pub const NAME: &str = "name";
	pub const BELONGS_TO: &str = "belongsTo";
	pub const MODULE: &str = "module";
	pub const NPM_PACKAGE: &str = "npmPackage";
	pub const LOCATION: &str = "location";
	pub const SOURCE: &str = "source";

	// Usage
	pub const DOCUMENTATION: &str = "documentation";
	pub const EXAMPLES: &str = "examples";
	pub const SIGNATURE: &str = "signature";
	pub const TYPE: &str = "type";
	pub const THROWS: &str = "throws";
	pub const PARAMETERS: &str = "parameters";
	pub const RETURNS: &str = "returns";
	pub const COMPLEXITY: &str = "complexity";

	// Organisation
	pub const CATEGORY: &str = "category";
	pub const TAGS: &str = "tags";

	// Social
	pub const AUTHORS: &str = "authors";
	pub const MAINTAINERS: &str = "maintainers";
	pub const COPYRIGHT: &str = "copyright";
	pub const LICENCE: &str = "licence";
	pub const SINCE: &str = "since";
	pub const DEPRECATED: &str = "deprecated";
	pub const REPOSITORY: &str = "repository";
	pub const HOMEPAGE: &str = "homepage";
	pub const STABILITY: &str = "stability";

	// Execution
	pub const PLATFORMS: &str = "platforms";
	pub const PORTABLE: &str = "portable";
}

/// Static row of the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinField {
	pub name: &'static str,
	pub allow_inheritance: bool,
	/// `Some` when the field propagates.
	pub propagation: Option<MergeStrategy>,
}

impl BuiltinField {
	const fn own(name: &'static str) -> Self {
		Self {
			name,
			allow_inheritance: false,
			propagation: None,
		}
	}

	const fn inherited(name: &'static str) -> Self {
		Self {
			name,
			allow_inheritance: true,
			propagation: None,
		}
	}

	const fn propagated(name: &'static str, merge: MergeStrategy) -> Self {
		Self {
			name,
			allow_inheritance: true,
			propagation: Some(merge),
		}
	}

	pub fn options(&self) -> FieldOptions {
		let options = FieldOptions {
			allow_inheritance: self.allow_inheritance,
			..FieldOptions::default()
		};
		match self.propagation {
			Some(merge) => options.propagating(merge),
			None => options,
		}
	}
}

pub static BUILTINS: &[BuiltinField] = &[
	BuiltinField::own(names::NAME),
	BuiltinField::own(names::BELONGS_TO),
	BuiltinField::inherited(names::MODULE),
	BuiltinField::inherited(names::NPM_PACKAGE),
	BuiltinField::own(names::LOCATION),
	BuiltinField::own(names::SOURCE),
	BuiltinField::own(names::DOCUMENTATION),
	BuiltinField::own(names::EXAMPLES),
	BuiltinField::own(names::SIGNATURE),
	BuiltinField::own(names::TYPE),
	BuiltinField::own(names::THROWS),
	BuiltinField::own(names::PARAMETERS),
	BuiltinField::own(names::RETURNS),
	BuiltinField::own(names::COMPLEXITY),
	BuiltinField::own(names::CATEGORY),
	BuiltinField::own(names::TAGS),
	BuiltinField::propagated(names::AUTHORS, MergeStrategy::Unique),
	BuiltinField::propagated(names::MAINTAINERS, MergeStrategy::Unique),
	BuiltinField::propagated(names::COPYRIGHT, MergeStrategy::Unique),
	BuiltinField::propagated(names::LICENCE, MergeStrategy::Unique),
	BuiltinField::inherited(names::SINCE),
	BuiltinField::inherited(names::DEPRECATED),
	BuiltinField::inherited(names::REPOSITORY),
	BuiltinField::inherited(names::HOMEPAGE),
	BuiltinField::propagated(names::STABILITY, MergeStrategy::LeastStable),
	BuiltinField::propagated(names::PLATFORMS, MergeStrategy::Unique),
	BuiltinField::propagated(names::PORTABLE, MergeStrategy::All),
];
