use std::io::Write;

use pretty_assertions::assert_eq;
use quill_context::{ConfigError, ContextConfig, DataManager, EventCounter, StalePolicy};

#[test]
fn manager_picks_up_reloaded_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "stale_snapshot = \"ignore\"").unwrap();

	let manager = DataManager::with_config(ContextConfig::load(file.path()).unwrap(), EventCounter::new());
	assert_eq!(manager.resolver().config().stale_snapshot, StalePolicy::Ignore);

	let mut updated = tempfile::NamedTempFile::new().unwrap();
	writeln!(updated, "stale_snapshot = \"reject\"\nvalidate_values = false").unwrap();
	manager.reload_config(ContextConfig::load(updated.path()).unwrap());

	let config = manager.resolver().config();
	assert_eq!(config.stale_snapshot, StalePolicy::Reject);
	assert!(!config.validate_values);
	assert_eq!(config.aux_editor_marker, "aux_editor_component");
}

#[test]
fn missing_file_reports_its_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");

	let err = ContextConfig::load(&path).unwrap_err();
	assert!(matches!(err, ConfigError::Io { .. }));
	assert!(err.to_string().contains("absent.toml"));
}
