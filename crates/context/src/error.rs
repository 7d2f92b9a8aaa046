//! Error types.
//!
//! Absent values are never errors; lookups return `None` for missing keys,
//! missing providers and resolution cycles alike.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or using snapshots.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
	/// A point-based snapshot was requested outside the node's bounds.
	#[error("wrong point: x={x}; y={y} (node is {width}x{height})")]
	PointOutOfBounds {
		x: i32,
		y: i32,
		width: i32,
		height: i32,
	},

	/// A snapshot stamped in one interaction event was used in another and
	/// the configured policy rejects it.
	#[error("cannot share data context between events; initial event count = {stamped}; current event count = {current}")]
	StaleSnapshot {
		stamped: u64,
		current: u64,
	},
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or schema.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, ContextError>;
