//! Error types for extension registration.

use thiserror::Error;

/// Errors reported by [`ExtensionPoint`](crate::ExtensionPoint) mutations.
///
/// Lookups never fail; a missing key is an empty sequence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionError {
	/// No bean was ever registered under the key.
	#[error("extension point '{point}' has no beans for key '{key}'")]
	UnknownKey {
		/// Label of the extension point.
		point: &'static str,
		/// Requested key.
		key: String,
	},

	/// The key exists but the given bean is not among its registrations.
	#[error("bean is not registered under key '{key}' in extension point '{point}'")]
	NotRegistered {
		/// Label of the extension point.
		point: &'static str,
		/// Key the bean claims.
		key: String,
	},
}

/// Result type for extension registration operations.
pub type Result<T> = std::result::Result<T, ExtensionError>;
