//! Built-in derivation rules.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use super::{DataRule, RuleRef};
use crate::key::DataKey;
use crate::keys;
use crate::model::{ClipboardAction, ClipboardHandler, FileEditor, NavigationTarget};
use crate::provider::DataProvider;
use crate::value::DataValue;

pub(super) fn register(map: &mut HashMap<DataKey, RuleRef>) {
	let mut add = |key: &DataKey, rule: RuleRef| {
		map.insert(key.clone(), rule);
	};

	add(keys::COPY_PROVIDER.key(), Arc::new(ClipboardRule(ClipboardAction::Copy)));
	add(keys::CUT_PROVIDER.key(), Arc::new(ClipboardRule(ClipboardAction::Cut)));
	add(keys::PASTE_PROVIDER.key(), Arc::new(ClipboardRule(ClipboardAction::Paste)));
	add(keys::CONTAINING_DIRECTORY.key(), Arc::new(ContainingDirectoryRule));
	add(keys::FILE_TEXT.key(), Arc::new(FileTextRule));
	add(keys::FILE_EDITOR.key(), Arc::new(FileEditorRule));
	add(keys::NAVIGATABLE_ARRAY.key(), Arc::new(NavigatableArrayRule));
	add(keys::EDITOR_EVEN_IF_INACTIVE.key(), Arc::new(InactiveEditorRule));
}

/// Wraps the editor in a clipboard handler.
struct ClipboardRule(ClipboardAction);

impl DataRule for ClipboardRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		let editor = keys::EDITOR.get(provider)?;
		let key = match self.0 {
			ClipboardAction::Copy => keys::COPY_PROVIDER,
			ClipboardAction::Cut => keys::CUT_PROVIDER,
			ClipboardAction::Paste => keys::PASTE_PROVIDER,
		};
		Some(key.value(ClipboardHandler::new(self.0, editor)))
	}
}

struct ContainingDirectoryRule;

impl DataRule for ContainingDirectoryRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		let file = keys::VIRTUAL_FILE
			.get(provider)
			.or_else(|| keys::EDITOR.get(provider)?.file())?;
		let dir = file.parent().map(Path::to_path_buf)?;
		Some(keys::CONTAINING_DIRECTORY.value(dir))
	}
}

struct FileTextRule;

impl DataRule for FileTextRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		let editor = keys::EDITOR.get(provider)?;
		Some(keys::FILE_TEXT.value(editor.text()))
	}
}

struct FileEditorRule;

impl DataRule for FileEditorRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		let editor = keys::EDITOR.get(provider)?;
		let file: Option<PathBuf> = keys::VIRTUAL_FILE.get(provider).or_else(|| editor.file());
		Some(keys::FILE_EDITOR.value(FileEditor { editor, file }))
	}
}

struct NavigatableArrayRule;

impl DataRule for NavigatableArrayRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		let target = keys::NAVIGATABLE.get(provider)?;
		let targets: Arc<[NavigationTarget]> = Arc::from(vec![target]);
		Some(keys::NAVIGATABLE_ARRAY.value(targets))
	}
}

/// Reads the editor without the focus-holder filter applied at the top level.
struct InactiveEditorRule;

impl DataRule for InactiveEditorRule {
	fn data(&self, provider: &dyn DataProvider) -> Option<DataValue> {
		let editor = keys::EDITOR.get(provider)?;
		Some(keys::EDITOR_EVEN_IF_INACTIVE.value(editor))
	}
}
