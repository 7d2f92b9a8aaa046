//! Node, provider and editor doubles shared by the unit tests.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

use crate::key::{DataKey, TypedKey};
use crate::model::{Editor, EditorRef};
use crate::node::{ContextNode, FocusTracker, HasParent, NodeRef, Size, TabbedNode};
use crate::provider::{DataProvider, DataSink, SharedProvider, TypedDataProvider};
use crate::value::DataValue;

pub(crate) const TAB_WIDTH: i32 = 50;
pub(crate) const TAB_STRIP_HEIGHT: i32 = 20;

/// Key/value provider recording every key it was asked for.
#[derive(Default)]
pub(crate) struct MapProvider {
	values: HashMap<DataKey, DataValue>,
	queries: Mutex<Vec<DataKey>>,
}

impl MapProvider {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with<T: Clone + Send + Sync + 'static>(mut self, key: &TypedKey<T>, value: T) -> Self {
		self.values.insert(key.key().clone(), DataValue::new(value));
		self
	}

	pub(crate) fn with_raw(mut self, key: &str, value: DataValue) -> Self {
		self.values.insert(DataKey::new(key), value);
		self
	}

	pub(crate) fn queries(&self) -> Vec<DataKey> {
		self.queries.lock().clone()
	}
}

impl DataProvider for MapProvider {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		self.queries.lock().push(key.clone());
		self.values.get(key).cloned()
	}
}

impl TypedDataProvider for MapProvider {
	fn calc_data(&self, key: &DataKey, sink: &mut DataSink) {
		if let Some(value) = self.data(key) {
			sink.put_value(key, value);
		}
	}
}

#[derive(Clone, Copy)]
enum Shape {
	Direct,
	Typed,
}

/// Configurable hierarchy node.
pub(crate) struct TestNode {
	name: &'static str,
	parent: Option<NodeRef>,
	own: Option<(Shape, Arc<MapProvider>)>,
	attached: Option<SharedProvider>,
	size: Size,
	markers: Vec<&'static str>,
	modal_root: bool,
	tabs: Vec<NodeRef>,
}

impl TestNode {
	pub(crate) fn new(name: &'static str) -> Self {
		Self {
			name,
			parent: None,
			own: None,
			attached: None,
			size: Size::new(200, 100),
			markers: Vec::new(),
			modal_root: false,
			tabs: Vec::new(),
		}
	}

	pub(crate) fn child_of(mut self, parent: &NodeRef) -> Self {
		self.parent = Some(parent.clone());
		self
	}

	pub(crate) fn direct(mut self, provider: &Arc<MapProvider>) -> Self {
		self.own = Some((Shape::Direct, provider.clone()));
		self
	}

	pub(crate) fn typed(mut self, provider: &Arc<MapProvider>) -> Self {
		self.own = Some((Shape::Typed, provider.clone()));
		self
	}

	pub(crate) fn attached(mut self, provider: SharedProvider) -> Self {
		self.attached = Some(provider);
		self
	}

	pub(crate) fn marker(mut self, marker: &'static str) -> Self {
		self.markers.push(marker);
		self
	}

	pub(crate) fn modal_root(mut self) -> Self {
		self.modal_root = true;
		self
	}

	pub(crate) fn tabs(mut self, tabs: Vec<NodeRef>) -> Self {
		self.tabs = tabs;
		self
	}

	pub(crate) fn build(self) -> NodeRef {
		Arc::new(self)
	}
}

impl std::fmt::Debug for TestNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}

impl HasParent for TestNode {
	fn parent(&self) -> Option<NodeRef> {
		self.parent.clone()
	}
}

impl ContextNode for TestNode {
	fn as_data_provider(&self) -> Option<&dyn DataProvider> {
		match &self.own {
			Some((Shape::Direct, provider)) => Some(&**provider),
			_ => None,
		}
	}

	fn as_typed_provider(&self) -> Option<&dyn TypedDataProvider> {
		match &self.own {
			Some((Shape::Typed, provider)) => Some(&**provider),
			_ => None,
		}
	}

	fn attached_provider(&self) -> Option<SharedProvider> {
		self.attached.clone()
	}

	fn size(&self) -> Size {
		self.size
	}

	fn as_tabbed(&self) -> Option<&dyn TabbedNode> {
		(!self.tabs.is_empty()).then_some(self as &dyn TabbedNode)
	}

	fn has_marker(&self, marker: &str) -> bool {
		self.markers.iter().any(|m| *m == marker)
	}

	fn is_modal_root(&self) -> bool {
		self.modal_root
	}
}

impl TabbedNode for TestNode {
	fn tab_at(&self, x: i32, y: i32) -> Option<usize> {
		if y >= TAB_STRIP_HEIGHT {
			return None;
		}
		let index = usize::try_from(x / TAB_WIDTH).ok()?;
		(index < self.tabs.len()).then_some(index)
	}

	fn tab_content(&self, index: usize) -> Option<NodeRef> {
		self.tabs.get(index).cloned()
	}
}

/// Focus tracker whose owner the test sets.
#[derive(Default)]
pub(crate) struct TestFocus {
	owner: Mutex<Option<NodeRef>>,
}

impl TestFocus {
	pub(crate) fn focus(&self, node: Option<&NodeRef>) {
		*self.owner.lock() = node.cloned();
	}
}

impl FocusTracker for TestFocus {
	fn focus_owner(&self) -> Option<NodeRef> {
		self.owner.lock().clone()
	}
}

#[derive(Debug)]
pub(crate) struct TestEditor {
	text: String,
	file: Option<PathBuf>,
	disposed: AtomicBool,
}

impl TestEditor {
	pub(crate) fn new(text: &str, file: Option<&str>) -> Arc<Self> {
		Arc::new(Self {
			text: text.to_string(),
			file: file.map(PathBuf::from),
			disposed: AtomicBool::new(false),
		})
	}

	pub(crate) fn dispose(&self) {
		self.disposed.store(true, Ordering::SeqCst);
	}
}

impl Editor for TestEditor {
	fn text(&self) -> String {
		self.text.clone()
	}

	fn file(&self) -> Option<PathBuf> {
		self.file.clone()
	}

	fn is_disposed(&self) -> bool {
		self.disposed.load(Ordering::SeqCst)
	}
}

pub(crate) fn editor_ref(editor: &Arc<TestEditor>) -> EditorRef {
	editor.clone()
}

/// Routes log output through the test harness so it shows up for failures.
pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::DEBUG)
		.with_test_writer()
		.try_init();
}
