//! Resolver configuration.
//!
//! Loaded from TOML; every field is optional.
//!
//! ```toml
//! # ignore | warn | reject
//! stale_snapshot = "warn"
//! validate_values = true
//! aux_editor_marker = "aux_editor_component"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// What a snapshot does when used after the interaction event it was
/// stamped in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
	/// Skip the check.
	Ignore,
	/// Log an error diagnostic and resolve anyway.
	#[default]
	Warn,
	/// Refuse the lookup.
	Reject,
}

/// Runtime configuration of the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextConfig {
	/// Reaction to stale snapshot reuse.
	pub stale_snapshot: StalePolicy,
	/// Run registered validators over resolved values.
	pub validate_values: bool,
	/// Marker on the focus holder that suppresses the `editor` key.
	pub aux_editor_marker: String,
}

impl Default for ContextConfig {
	fn default() -> Self {
		Self {
			stale_snapshot: StalePolicy::default(),
			validate_values: true,
			aux_editor_marker: "aux_editor_component".to_string(),
		}
	}
}

impl ContextConfig {
	/// Parses configuration from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}
}
