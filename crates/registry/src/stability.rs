//! Stability index.
//!
//! Four levels ordered from least to most stable, following Node's stability
//! index. Merging stabilities keeps the least stable candidate.

use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Stability {
	Deprecated,
	Experimental,
	Stable,
	Locked,
}

/// Identifier not on the stability scale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no stability with id \"{0}\"")]
pub struct UnknownStability(pub String);

impl Stability {
	/// Parses a stability identifier such as `"experimental"`.
	pub fn from_identifier(id: &str) -> Result<Self, UnknownStability> {
		id.parse().map_err(|_| UnknownStability(id.to_string()))
	}

	/// Position on the scale, `0` being the least stable.
	pub const fn index(self) -> u8 {
		match self {
			Self::Deprecated => 0,
			Self::Experimental => 1,
			Self::Stable => 2,
			Self::Locked => 3,
		}
	}

	pub fn identifier(self) -> &'static str {
		self.into()
	}

	pub const fn title(self) -> &'static str {
		match self {
			Self::Deprecated => "Deprecated",
			Self::Experimental => "Experimental",
			Self::Stable => "Stable",
			Self::Locked => "Locked",
		}
	}

	pub const fn description(self) -> &'static str {
		match self {
			Self::Deprecated => {
				"This feature is known to be problematic, and will either be entirely removed \
				 from the system, or completely redesigned. You should not rely on it."
			}
			Self::Experimental => {
				"This feature is experimental and likely to change (or be removed) in the future."
			}
			Self::Stable => {
				"This feature is stable, and its API is unlikely to change (unless deemed \
				 necessary for security or other important reasons). You should expect backwards \
				 compatibility with the system, and a well-defined and automated (if possible) \
				 migration path if it changes."
			}
			Self::Locked => {
				"This API will not change, however security and other bug fixes will still be \
				 applied."
			}
		}
	}
}
