//! Host-side doubles for integration tests, built only on the public API.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use quill_context::{
	ContextNode, DataKey, DataProvider, DataValue, Editor, FocusTracker, HasParent, NodeRef, Size, TabbedNode,
};
use rustc_hash::FxHashMap as HashMap;

/// A panel in a host widget tree.
#[derive(Default)]
pub struct Panel {
	name: &'static str,
	parent: Option<NodeRef>,
	values: Option<HashMap<DataKey, DataValue>>,
	tabs: Vec<NodeRef>,
}

impl Panel {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			..Self::default()
		}
	}

	pub fn under(mut self, parent: &NodeRef) -> Self {
		self.parent = Some(parent.clone());
		self
	}

	/// Makes the panel a provider answering `key` with `value`.
	pub fn providing(mut self, key: &DataKey, value: DataValue) -> Self {
		self.values.get_or_insert_with(HashMap::default).insert(key.clone(), value);
		self
	}

	/// Turns the panel into a tab container; each tab is 40 wide along a
	/// 16-high strip.
	pub fn with_tabs(mut self, tabs: Vec<NodeRef>) -> Self {
		self.tabs = tabs;
		self
	}

	pub fn build(self) -> NodeRef {
		Arc::new(self)
	}
}

impl fmt::Debug for Panel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Panel")
			.field("name", &self.name)
			.field("provides", &self.values.is_some())
			.field("tabs", &self.tabs.len())
			.finish_non_exhaustive()
	}
}

impl HasParent for Panel {
	fn parent(&self) -> Option<NodeRef> {
		self.parent.clone()
	}
}

impl DataProvider for Panel {
	fn data(&self, key: &DataKey) -> Option<DataValue> {
		self.values.as_ref()?.get(key).cloned()
	}
}

impl ContextNode for Panel {
	fn as_data_provider(&self) -> Option<&dyn DataProvider> {
		self.values.is_some().then_some(self as &dyn DataProvider)
	}

	fn size(&self) -> Size {
		Size::new(320, 240)
	}

	fn as_tabbed(&self) -> Option<&dyn TabbedNode> {
		(!self.tabs.is_empty()).then_some(self as &dyn TabbedNode)
	}
}

impl TabbedNode for Panel {
	fn tab_at(&self, x: i32, y: i32) -> Option<usize> {
		if !(0..16).contains(&y) {
			return None;
		}
		let index = usize::try_from(x / 40).ok()?;
		(index < self.tabs.len()).then_some(index)
	}

	fn tab_content(&self, index: usize) -> Option<NodeRef> {
		self.tabs.get(index).cloned()
	}
}

/// Focus tracker driven by the test.
#[derive(Default)]
pub struct Focus(Mutex<Option<NodeRef>>);

impl Focus {
	pub fn set(&self, node: &NodeRef) {
		*self.0.lock() = Some(node.clone());
	}
}

impl FocusTracker for Focus {
	fn focus_owner(&self) -> Option<NodeRef> {
		self.0.lock().clone()
	}
}

#[derive(Debug)]
pub struct Document {
	pub text: &'static str,
	pub path: Option<&'static str>,
}

impl Editor for Document {
	fn text(&self) -> String {
		self.text.to_string()
	}

	fn file(&self) -> Option<PathBuf> {
		self.path.map(PathBuf::from)
	}
}

/// Log sink for `tracing_subscriber::fmt` that keeps everything in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.lock()).into_owned()
	}

	/// Runs `f` with a subscriber writing into this sink.
	pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
		let sink = self.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_ansi(false)
			.with_max_level(tracing::Level::TRACE)
			.with_writer(move || sink.clone())
			.finish();
		tracing::subscriber::with_default(subscriber, f)
	}
}

impl io::Write for CapturedLogs {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}
