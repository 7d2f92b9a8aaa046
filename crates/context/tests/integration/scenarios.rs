use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_context::{
	ContextConfig, ContextError, ContextResolver, DataKey, DataManager, DataProvider, DataValue, EditorRef,
	EventCounter, FnRule, StalePolicy, keys,
};
use quill_extensions::ExtensionRegistry;

use crate::common::{CapturedLogs, Document, Focus, Panel};

fn word(value: &'static str) -> DataValue {
	DataValue::new(value)
}

fn as_word(value: Option<DataValue>) -> Option<&'static str> {
	value?.downcast_ref::<&'static str>().copied()
}

#[test]
fn explicit_registration_is_listed_for_its_key() {
	let registry: ExtensionRegistry<Arc<&'static str>> = ExtensionRegistry::new("providers");
	registry.add_explicit("EDITOR", Arc::new("E1"));

	let listed: Vec<&str> = registry.for_key("EDITOR").iter().map(|e| **e).collect();
	assert_eq!(listed, vec!["E1"]);
	assert!(registry.for_key("OTHER").is_empty());
}

#[test]
fn lookup_climbs_to_parent_provider() {
	let b = Panel::new("b").providing(&DataKey::from_static("X"), word("V")).build();
	let a = Panel::new("a").under(&b).build();

	let manager = DataManager::with_config(ContextConfig::default(), EventCounter::new());
	let snapshot = manager.snapshot_for(&a);
	assert_eq!(as_word(snapshot.get(&DataKey::from_static("X"))), Some("V"));
	assert_eq!(as_word(snapshot.get(&DataKey::from_static("Y"))), None);
}

#[test]
fn copy_handler_wraps_the_provided_editor() {
	let editor: EditorRef = Arc::new(Document {
		text: "hello",
		path: Some("/work/notes.txt"),
	});
	let node = Panel::new("editor").providing(keys::EDITOR.key(), keys::EDITOR.value(editor.clone())).build();

	let manager = DataManager::with_config(ContextConfig::default(), EventCounter::new());
	let snapshot = manager.snapshot_for(&node);
	let handler = keys::COPY_PROVIDER.get(&snapshot).expect("derived copy handler");
	assert!(handler.targets(&editor));
	assert_eq!(keys::FILE_TEXT.get(&snapshot).as_deref(), Some("hello"));
}

#[test]
fn self_referencing_rule_is_absent() {
	let resolver = ContextResolver::default();
	resolver.rules().register_rule(
		&DataKey::from_static("LOOP"),
		Arc::new(FnRule(|p: &dyn DataProvider| p.data(&DataKey::from_static("LOOP")))),
	);
	let node = Panel::new("n").providing(&DataKey::from_static("other"), word("o")).build();

	let manager = DataManager::new(resolver, EventCounter::new());
	let logs = CapturedLogs::default();
	let value = logs.capture(|| manager.snapshot_for(&node).get(&DataKey::from_static("LOOP")));
	assert!(value.is_none());
	assert_eq!(manager.resolver().stats().snapshot().cycles, 1);
	assert!(logs.contents().contains("resolution cycle"));
}

#[test]
fn stale_snapshot_reports_then_resolves() {
	let events = EventCounter::new();
	for _ in 0..5 {
		events.advance();
	}
	let node = Panel::new("n").providing(&DataKey::from_static("K"), word("k")).build();
	let manager = DataManager::with_config(ContextConfig::default(), events.clone());
	let snapshot = manager.snapshot_for(&node);
	assert_eq!(snapshot.stamp(), quill_context::EventStamp::At(5));

	assert_eq!(events.advance(), 6);
	let logs = CapturedLogs::default();
	let value = logs.capture(|| snapshot.get(&DataKey::from_static("K")));
	assert_eq!(as_word(value), Some("k"));
	assert!(logs.contents().contains("cannot share data context between events"));
}

#[test]
fn stale_snapshot_is_refused_when_configured() {
	let events = EventCounter::new();
	let node = Panel::new("n").providing(&DataKey::from_static("K"), word("k")).build();
	let manager = DataManager::with_config(
		ContextConfig {
			stale_snapshot: StalePolicy::Reject,
			..ContextConfig::default()
		},
		events.clone(),
	);
	let snapshot = manager.snapshot_for(&node);
	events.advance();

	assert_eq!(
		snapshot.try_get(&DataKey::from_static("K")).unwrap_err(),
		ContextError::StaleSnapshot { stamped: 0, current: 1 }
	);
}

#[test]
fn snapshot_at_validates_point_and_picks_tab() {
	let tabs: Vec<_> = ["one", "two", "three"]
		.into_iter()
		.map(|label| Panel::new(label).providing(&DataKey::from_static("tab"), word(label)).build())
		.collect();
	let container = Panel::new("tabs").with_tabs(tabs).build();
	let manager = DataManager::with_config(ContextConfig::default(), EventCounter::new());

	let err = manager.snapshot_at(&container, -5, 0).unwrap_err();
	assert!(matches!(err, ContextError::PointOutOfBounds { x: -5, y: 0, .. }));
	assert_eq!(err.to_string(), "wrong point: x=-5; y=0 (node is 320x240)");

	let snapshot = manager.snapshot_at(&container, 85, 4).expect("inside tab strip");
	assert_eq!(as_word(snapshot.get(&DataKey::from_static("tab"))), Some("three"));
}

#[test]
fn focus_holder_marker_hides_editor() {
	#[derive(Debug)]
	struct SearchField;

	impl quill_context::HasParent for SearchField {
		fn parent(&self) -> Option<quill_context::NodeRef> {
			None
		}
	}

	impl quill_context::ContextNode for SearchField {
		fn has_marker(&self, marker: &str) -> bool {
			marker == "aux_editor_component"
		}
	}

	let editor: EditorRef = Arc::new(Document { text: "", path: None });
	let node = Panel::new("editor").providing(keys::EDITOR.key(), keys::EDITOR.value(editor)).build();
	let search: quill_context::NodeRef = Arc::new(SearchField);
	let focus = Arc::new(Focus::default());
	focus.set(&search);

	let manager = DataManager::new(ContextResolver::default().with_focus(focus), EventCounter::new());
	let snapshot = manager.snapshot_for(&node);
	assert!(keys::EDITOR.get(&snapshot).is_none());
	assert!(keys::EDITOR_EVEN_IF_INACTIVE.get(&snapshot).is_some());
}
