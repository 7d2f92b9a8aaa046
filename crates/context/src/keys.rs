//! Well-known keys.
//!
//! The first group is answered by providers; the second is derived by the
//! built-in rules; the last group is reserved and answered from the node
//! itself without consulting any provider.

use std::path::PathBuf;
use std::sync::Arc;

use crate::key::TypedKey;
use crate::model::{ClipboardHandler, EditorRef, FileEditor, NavigationTarget};
use crate::node::{Modality, NodeRef};

/// The editor in focus.
pub const EDITOR: TypedKey<EditorRef> = TypedKey::new("editor");
/// The file in focus.
pub const VIRTUAL_FILE: TypedKey<PathBuf> = TypedKey::new("virtual_file");
/// A single navigation target.
pub const NAVIGATABLE: TypedKey<NavigationTarget> = TypedKey::new("navigatable");

/// Copy handler, derived from [`EDITOR`].
pub const COPY_PROVIDER: TypedKey<ClipboardHandler> = TypedKey::new("copy_provider");
/// Cut handler, derived from [`EDITOR`].
pub const CUT_PROVIDER: TypedKey<ClipboardHandler> = TypedKey::new("cut_provider");
/// Paste handler, derived from [`EDITOR`].
pub const PASTE_PROVIDER: TypedKey<ClipboardHandler> = TypedKey::new("paste_provider");
/// Directory containing the file in focus.
pub const CONTAINING_DIRECTORY: TypedKey<PathBuf> = TypedKey::new("containing_directory");
/// Text of the editor in focus.
pub const FILE_TEXT: TypedKey<String> = TypedKey::new("file_text");
/// Editor paired with its file.
pub const FILE_EDITOR: TypedKey<FileEditor> = TypedKey::new("file_editor");
/// All navigation targets in focus.
pub const NAVIGATABLE_ARRAY: TypedKey<Arc<[NavigationTarget]>> = TypedKey::new("navigatable_array");
/// The editor even when the focus holder suppresses [`EDITOR`].
pub const EDITOR_EVEN_IF_INACTIVE: TypedKey<EditorRef> = TypedKey::new("editor_even_if_inactive");

/// Whether the node sits in a modal scope.
pub const IS_MODAL_CONTEXT: TypedKey<bool> = TypedKey::new("is_modal_context");
/// The node the lookup started from.
pub const CONTEXT_COMPONENT: TypedKey<NodeRef> = TypedKey::new("context_component");
/// Modality classification of the node.
pub const MODALITY_STATE: TypedKey<Modality> = TypedKey::new("modality_state");
