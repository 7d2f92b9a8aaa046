//! Values stored under the well-known keys.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// The editor surface the built-in rules derive from.
pub trait Editor: Send + Sync + fmt::Debug {
	/// Full document text.
	fn text(&self) -> String;

	/// Backing file, if the document has one.
	fn file(&self) -> Option<PathBuf>;

	/// Returns true once the editor has been released by its owner.
	fn is_disposed(&self) -> bool {
		false
	}
}

/// Shared editor handle, the value type of [`keys::EDITOR`](crate::keys::EDITOR).
pub type EditorRef = Arc<dyn Editor>;

/// Clipboard operation a [`ClipboardHandler`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardAction {
	Copy,
	Cut,
	Paste,
}

/// Clipboard handler bound to an editor.
#[derive(Debug, Clone)]
pub struct ClipboardHandler {
	pub action: ClipboardAction,
	pub editor: EditorRef,
}

impl ClipboardHandler {
	pub fn new(action: ClipboardAction, editor: EditorRef) -> Self {
		Self { action, editor }
	}

	/// Returns true if this handler targets `editor`.
	pub fn targets(&self, editor: &EditorRef) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(&self.editor), Arc::as_ptr(editor))
	}
}

/// An editor paired with the file it shows.
#[derive(Debug, Clone)]
pub struct FileEditor {
	pub editor: EditorRef,
	pub file: Option<PathBuf>,
}

/// A location a user can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationTarget {
	pub file: PathBuf,
	pub offset: usize,
}

impl NavigationTarget {
	pub fn new(file: impl Into<PathBuf>, offset: usize) -> Self {
		Self {
			file: file.into(),
			offset,
		}
	}
}
