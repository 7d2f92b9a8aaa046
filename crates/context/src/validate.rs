//! Advisory validation of resolved values.
//!
//! Validators are registered per plain key in an [`ExtensionRegistry`]. A
//! finding is logged and counted, and the value is still returned.

use std::marker::PhantomData;
use std::sync::Arc;

use quill_extensions::ExtensionRegistry;

use crate::key::{DataKey, TypedKey};
use crate::keys;
use crate::model::EditorRef;
use crate::value::DataValue;

/// Inspects a resolved value.
pub trait DataValidator: Send + Sync {
	/// Describes what is wrong with `value`, or returns `None` if it is fine.
	fn find_invalid(&self, key: &DataKey, value: &DataValue) -> Option<String>;
}

/// Shared validator handle.
pub type ValidatorRef = Arc<dyn DataValidator>;

/// Checks that a value has the type its typed key declares.
pub struct TypeValidator<T>(PhantomData<fn() -> T>);

impl<T> TypeValidator<T> {
	pub fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T> Default for TypeValidator<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> DataValidator for TypeValidator<T> {
	fn find_invalid(&self, _key: &DataKey, value: &DataValue) -> Option<String> {
		if value.is::<T>() {
			return None;
		}
		Some(format!(
			"expected {}, got {}",
			std::any::type_name::<T>(),
			value.type_name()
		))
	}
}

/// Rejects editors that were already disposed.
struct LiveEditorValidator;

impl DataValidator for LiveEditorValidator {
	fn find_invalid(&self, _key: &DataKey, value: &DataValue) -> Option<String> {
		let editor = value.downcast_ref::<EditorRef>()?;
		editor.is_disposed().then(|| format!("disposed editor {editor:?}"))
	}
}

fn typed<T: Clone + Send + Sync + 'static>(registry: &ExtensionRegistry<ValidatorRef>, key: &TypedKey<T>) {
	registry.add_explicit(key.name(), Arc::new(TypeValidator::<T>::new()));
}

/// Creates the validator registry with type checks for the well-known keys.
pub fn builtin_validators() -> ExtensionRegistry<ValidatorRef> {
	let registry = ExtensionRegistry::new("data_validators");

	typed(&registry, &keys::EDITOR);
	typed(&registry, &keys::VIRTUAL_FILE);
	typed(&registry, &keys::NAVIGATABLE);
	typed(&registry, &keys::COPY_PROVIDER);
	typed(&registry, &keys::CUT_PROVIDER);
	typed(&registry, &keys::PASTE_PROVIDER);
	typed(&registry, &keys::CONTAINING_DIRECTORY);
	typed(&registry, &keys::FILE_TEXT);
	typed(&registry, &keys::FILE_EDITOR);
	typed(&registry, &keys::NAVIGATABLE_ARRAY);
	typed(&registry, &keys::EDITOR_EVEN_IF_INACTIVE);

	let live: ValidatorRef = Arc::new(LiveEditorValidator);
	registry.add_explicit(keys::EDITOR.name(), live.clone());
	registry.add_explicit(keys::EDITOR_EVEN_IF_INACTIVE.name(), live);

	registry
}
